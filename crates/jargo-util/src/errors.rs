use miette::Diagnostic;
use thiserror::Error;

/// Errors raised outside the resolver core: reading project files, talking to
/// repositories, parsing what they return.
#[derive(Debug, Error, Diagnostic)]
pub enum JargoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Jargo.toml for syntax errors"))]
    Manifest { message: String },

    /// `~/.jargo/config.toml` (or `$JARGO_HOME/config.toml`) is unreadable.
    #[error("Invalid global config: {message}")]
    #[diagnostic(help("Fix or remove the config.toml in your Jargo home directory"))]
    Config { message: String },

    /// A repository document (POM, `maven-metadata.xml`) failed to parse.
    #[error("Malformed {document}: {message}")]
    Document { document: String, message: String },

    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },

    #[error("Network error: {message}")]
    #[diagnostic(help("Check the repository URLs and your network connection"))]
    Network { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type JargoResult<T> = miette::Result<T>;
