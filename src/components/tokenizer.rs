use crate::model::TransformerModelArgs;
use crate::Result;

pub trait Tokenizer: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<u32>>;
    fn decode(&self, tokens: &[u32]) -> Result<String>;
    fn vocab_size(&self) -> usize;
    fn eos_id(&self) -> u32;
}

/// Byte-level tokenizer: ids 0..=255 are raw bytes, everything above is
/// reserved for the model's special tokens. Good enough for debug flavors.
pub struct ByteTokenizer {
    vocab_size: usize,
    eos_id: u32,
}

impl Tokenizer for ByteTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok(text.bytes().map(u32::from).collect())
    }

    fn decode(&self, tokens: &[u32]) -> Result<String> {
        let bytes: Vec<u8> = tokens
            .iter()
            .filter(|&&t| t < 256 && t != self.eos_id)
            .map(|&t| t as u8)
            .collect();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    fn eos_id(&self) -> u32 {
        self.eos_id
    }
}

pub fn build_tokenizer(model_args: &TransformerModelArgs) -> Result<Box<dyn Tokenizer>> {
    let titan = &model_args.titan_args;
    if titan.vocab_size < 256 {
        anyhow::bail!(
            "byte tokenizer needs a vocab of at least 256, got {}",
            titan.vocab_size
        );
    }
    Ok(Box::new(ByteTokenizer {
        vocab_size: titan.vocab_size,
        eos_id: titan.eos_id,
    }))
}
