pub mod check;
pub mod cst;
pub mod input;
pub mod tokens;
