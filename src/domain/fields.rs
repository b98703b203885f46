use super::log_event::Pipe;

pub const PIPE_FIELD: &str = "pipe";

/// The one key/value field attached to every downstream write: `pipe = <tag>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    pipe: Pipe,
}

impl Fields {
    pub fn for_pipe(pipe: Pipe) -> Self {
        Self { pipe }
    }

    pub fn pipe(&self) -> &'static str {
        self.pipe.as_str()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        std::iter::once((PIPE_FIELD, self.pipe()))
    }
}
