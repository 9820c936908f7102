/// One intermediate fragment of an upload.
pub struct Chunk {
    /// Session the chunk belongs to.
    pub session_key: String,
    /// Chunk content.
    pub content: Vec<u8>,
    /// Nth of the upload, starting at 1.
    pub nth: u32,
}
