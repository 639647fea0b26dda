mod grammar {
    mod constructors_tests;
    mod expressions_tests;
    mod flwor_tests;
    mod full_text_tests;
    mod paths_tests;
    mod prolog_tests;
    mod scripting_tests;
    mod trivia_tests;
    mod types_tests;
    mod update_tests;
}

mod recovery {
    mod incomplete_tests;
    mod limits_tests;
    mod properties_tests;
    mod unexpected_tests;
}
