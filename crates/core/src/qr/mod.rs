mod envelope;
mod error;

pub use envelope::{
    build_envelope, decode_payload, download_file_name, encode_payload, QrEnvelope,
    QrProfileData, PAYLOAD_TYPE, PAYLOAD_VERSION,
};
pub use error::QrError;
