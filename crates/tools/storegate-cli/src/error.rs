#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] storegate_auth::error::Error),

    #[error(transparent)]
    Config(#[from] storegate_config::error::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
