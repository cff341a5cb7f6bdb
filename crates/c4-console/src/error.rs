//! Console protocol errors.

/// Errors that can occur while reading and parsing console commands.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// A command needs an argument that was not given.
    #[error("missing value for {param}")]
    MissingValue {
        /// The parameter that has no value.
        param: String,
    },

    /// An argument is not a valid number.
    #[error("invalid value for {param}: {value}")]
    InvalidValue {
        /// The parameter being parsed.
        param: String,
        /// The text that failed to parse.
        value: String,
    },

    /// `new` takes either no arguments or exactly width, height and connect.
    #[error("usage: new [width height connect]")]
    MalformedNew,

    /// `setoption` is missing its `name` or `value` keyword.
    #[error("usage: setoption name <option> value <value>")]
    MalformedSetOption,

    /// `setoption` names an option the console does not have.
    #[error("unknown option: {name}")]
    UnknownOption {
        /// The option name as given.
        name: String,
    },

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
