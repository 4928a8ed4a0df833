use crate::graph::VertexId;

/// Issues vertex ids for one graph-construction session.
///
/// Ids start at 0 and strictly increase; none is ever handed out twice.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> VertexId {
        let id = VertexId(self.next);
        self.next += 1;
        id
    }
}
