// Detection service API — the client plus the transport it sends through.
//
// The client builds requests and enforces the response contract; the
// transport moves bytes. Tests swap in an in-memory transport.

pub mod client;
pub mod error;
pub mod transport;

pub use client::FakeProfileApi;
pub use error::{ApiError, TransportError};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
