use thiserror::Error;

/// A snapshot that breaks the identifier uniqueness invariant. Caller bug;
/// `DiffListView::apply` aborts on it rather than displaying garbage.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("duplicate section identifier {0} in snapshot")]
    DuplicateSection(String),
    #[error("duplicate item identifier {0} in snapshot")]
    DuplicateItem(String),
}

/// The list was driven before `configure` installed a layout and builders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("list used before configure(): no layout or cell builder installed")]
    NotConfigured,
}

/// A content builder panicked while producing content for one position.
/// Recovered per slot: the slot renders placeholder content and the error
/// observer is notified once; sibling slots and the displayed snapshot are
/// untouched.
#[derive(Clone, Debug, Error)]
#[error("content builder failed for {target} at section {section}, row {row}: {message}")]
pub struct BuildError {
    /// `Debug` rendering of the item or section identifier handed to the builder.
    pub target: String,
    pub section: usize,
    pub row: usize,
    pub message: String,
}
