/// A request body to benchmark, delivered in chunks of `chunk_size` bytes.
#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    file: TestFile,
    chunk_size: usize,
}

impl TestCase {
    pub fn new(name: &'static str, file: TestFile, chunk_size: usize) -> Self {
        Self { name, file, chunk_size: chunk_size.max(1) }
    }

    /// The whole body in a single chunk.
    pub fn whole(name: &'static str, file: TestFile) -> Self {
        Self::new(name, file, file.content().len())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunks(&self) -> impl Iterator<Item = &'static [u8]> {
        self.file.content().as_bytes().chunks(self.chunk_size)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}
