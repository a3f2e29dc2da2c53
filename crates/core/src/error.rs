#[derive(Debug, thiserror::Error)]
pub enum StampError {
    #[error("uuid version {0} is not supported or not valid")]
    UnsupportedVersion(u32),
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("record has no value for primary key '{0}'")]
    MissingKey(String),
    #[error("a record with primary key {0} already exists")]
    DuplicateKey(String),
    #[error("no record with primary key {0}")]
    RecordNotFound(String),
    #[error("no auto-increment keys left after {0}")]
    KeySpaceExhausted(u64),
}

pub type StampResult<T> = std::result::Result<T, StampError>;
