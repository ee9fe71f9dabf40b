use arpscope_domain::{DecodedFrame, FrameDecodeError};

pub trait FrameDecoder: Send + Sync {
    fn decode(&self, frame: &[u8]) -> Result<DecodedFrame, FrameDecodeError>;
}
