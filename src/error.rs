use std::error::Error;
use std::fmt::{Debug, Display, Error as FmtError, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    PathNotFound,
    PreferenceStore,
}

impl ErrorKind {
    fn tag(self) -> &'static str {
        match self {
            ErrorKind::Usage => "usage",
            ErrorKind::PathNotFound => "path-not-found",
            ErrorKind::PreferenceStore => "preference-store",
        }
    }
}

pub struct AppErr {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn Error>>,
}

impl AppErr {
    fn from_err<E>(kind: ErrorKind, message: &str, error: E) -> AppErr
    where
        E: Error + 'static,
    {
        AppErr {
            kind,
            message: message.to_string(),
            source: Some(Box::new(error)),
        }
    }

    pub fn new(kind: ErrorKind, message: &str) -> AppErr {
        AppErr {
            kind,
            message: message.to_string(),
            source: None,
        }
    }

    pub fn usage(message: &str) -> AppErr {
        AppErr::new(ErrorKind::Usage, message)
    }

    pub fn path_not_found(message: &str) -> AppErr {
        AppErr::new(ErrorKind::PathNotFound, message)
    }

    /// Every store failure reads the same to the user, the cause stays in `source()`.
    pub fn preference_store<E>(error: E) -> AppErr
    where
        E: Error + 'static,
    {
        AppErr::from_err(ErrorKind::PreferenceStore, STORE_FAILURE, error)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

const STORE_FAILURE: &str = "Could not update desktoppicture.db";

impl Display for AppErr {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        write!(f, "[{}] {}", self.kind.tag(), self.message)
    }
}

impl Debug for AppErr {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        Display::fmt(self, f)
    }
}

impl Error for AppErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self.source {
            Some(ref err) => Some(err.as_ref()),
            None => None,
        }
    }
}

macro_rules! impl_from_error {
    ($type:ty => $ctor:ident) => {
        impl From<$type> for AppErr {
            fn from(err: $type) -> Self {
                AppErr::$ctor(err)
            }
        }
    };
}

// Error conversions
impl_from_error!(rusqlite::Error => preference_store);
