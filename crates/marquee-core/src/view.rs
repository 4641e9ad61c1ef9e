use crate::Modifier;

/// Retained content tree, the currency of cell and header builders. Content
/// is declarative data; turning it into pixels belongs to whatever renderer
/// hosts the list.
#[derive(Clone, Debug)]
pub enum ViewKind {
    Box,
    Row,
    Column,
    Stack,
    Text { text: String, size: f32 },
    /// Carries a source URL only; fetching and decoding are the caller's
    /// image loader's problem.
    Image { source: String },
    Spinner,
}

#[derive(Clone, Debug)]
pub struct View {
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        View {
            kind,
            modifier: Modifier::default(),
            children: vec![],
        }
    }

    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }

    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }

    pub fn child(mut self, kid: View) -> Self {
        self.children.push(kid);
        self
    }
}
