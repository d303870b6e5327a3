use crate::modules::error::code::ErrorCode;
use crate::modules::error::BulkMailerResult;
use crate::raise_error;
use mail_send::smtp::message::IntoMessage;
use mail_send::SmtpClient;
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;

/// A connection to the relay, with or without TLS.
pub enum RelayClient {
    Plain(SmtpClient<TcpStream>),
    Tls(SmtpClient<TlsStream<TcpStream>>),
}

/// Runs the same SMTP call on whichever stream the client holds.
macro_rules! on_stream {
    ($client:expr, $smtp:ident => $call:expr) => {
        (match $client {
            RelayClient::Plain($smtp) => $call,
            RelayClient::Tls($smtp) => $call,
        })
        .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::SmtpCommandFailed))
    };
}

pub(crate) trait Sender {
    async fn send_noop(&mut self) -> BulkMailerResult<()>;
    async fn reset(&mut self) -> BulkMailerResult<()>;
    async fn send_email<'x>(&mut self, message: impl IntoMessage<'x>) -> BulkMailerResult<()>;
}

impl Sender for RelayClient {
    async fn send_noop(&mut self) -> BulkMailerResult<()> {
        on_stream!(self, smtp => smtp.noop().await)
    }

    async fn reset(&mut self) -> BulkMailerResult<()> {
        on_stream!(self, smtp => smtp.rset().await)
    }

    async fn send_email<'x>(&mut self, message: impl IntoMessage<'x>) -> BulkMailerResult<()> {
        on_stream!(self, smtp => smtp.send(message).await)
    }
}
