use crate::request::error::RequestError;
use crate::response::error::ResponseError;
use crate::transport::error::TransportError;
use thiserror::Error;

/// Any error an orchestration call can surface.
///
/// Each stage of the pipeline keeps its own error enum; this wraps them
/// transparently so callers can match on the stage or just display the
/// message.
#[derive(Debug, Error)]
pub enum OpenWeatherError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Response(#[from] ResponseError),
}
