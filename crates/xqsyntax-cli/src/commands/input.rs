use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use xqsyntax_core::SourceText;

use crate::cli::InputArgs;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input required (FILE, - or -e TEXT)")]
    Missing,
}

/// Loaded query text with the name diagnostics should show for it.
pub struct Input {
    pub name: String,
    pub source: SourceText,
}

pub fn load(args: &InputArgs) -> Result<Input, InputError> {
    if let Some(text) = &args.text {
        return Ok(Input {
            name: "<expr>".to_string(),
            source: SourceText::from(text.as_str()),
        });
    }
    let Some(path) = &args.file else {
        return Err(InputError::Missing);
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(InputError::Stdin)?;
        return Ok(Input {
            name: "<stdin>".to_string(),
            source: SourceText::from(buf),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| InputError::File {
        path: path.clone(),
        source,
    })?;
    Ok(Input {
        name: path.display().to_string(),
        source: SourceText::from(text),
    })
}

/// Loads input or exits with status 1.
pub fn load_or_exit(args: &InputArgs) -> Input {
    load(args).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}
