use crate::{
    modules::{
        context::Initialize,
        error::{code::ErrorCode, BulkMailerResult},
    },
    raise_error,
};

/// Installs the ring crypto provider used by the relay's TLS connections.
pub struct RelayTls;

impl Initialize for RelayTls {
    async fn initialize() -> BulkMailerResult<()> {
        rustls::crypto::CryptoProvider::install_default(rustls::crypto::ring::default_provider())
            .map_err(|_| {
                raise_error!(
                    "failed to set crypto provider".into(),
                    ErrorCode::InternalError
                )
            })
    }
}
