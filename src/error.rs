use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::symbology::EncodeError;

/// Failure categories for a generation request.
///
/// Every variant aborts the whole request. The detailed message is meant for
/// logs; end users see [`LabelError::user_message`].
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("no codes were supplied")]
    EmptyInput,

    #[error("no output directory was chosen")]
    NoDestination,

    #[error("line {line}: '{content}' is not a non-negative integer")]
    InvalidCodeFormat { line: usize, content: String },

    #[error("failed to render code {code}: {source}")]
    RenderFailure {
        code: String,
        #[source]
        source: EncodeError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LabelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LabelError::Io {
            path: path.into(),
            source,
        }
    }

    /// Fixed message shown to the person who asked for the labels.
    pub fn user_message(&self) -> &'static str {
        match self {
            LabelError::EmptyInput => "O campo códigos está vazio!",
            LabelError::NoDestination => "Por favor, selecione onde você deseja salvar o arquivo!",
            LabelError::InvalidCodeFormat { .. } => "Código inválido! Use apenas números.",
            LabelError::RenderFailure { .. } | LabelError::Io { .. } => {
                "Ocorreu um erro ao gerar os códigos de barras!"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_do_not_leak_details() {
        let err = LabelError::InvalidCodeFormat {
            line: 3,
            content: "12a".into(),
        };
        assert!(err.to_string().contains("12a"));
        assert!(!err.user_message().contains("12a"));

        let err = LabelError::io("/nope/x.png", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().contains("/nope/x.png"));
        assert_eq!(
            err.user_message(),
            "Ocorreu um erro ao gerar os códigos de barras!"
        );
    }
}
