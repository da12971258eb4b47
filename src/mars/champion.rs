use super::MemoryCell;

/// Descriptive metadata captured from a warrior's comment tags, plus
/// the origin offset set by `ORG`.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    pub name: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub date: Option<String>,
    pub strategy: Option<String>,
    pub origin: i32,
}

/// A compiled program. The instruction list is the champion's private
/// master copy; execution only ever mutates the copies placed into core
/// memory at load time. The champion itself is mutated in exactly two
/// ways: the virtual machine assigns its load index, and clears
/// `is_alive` when its last task dies.
#[derive(Debug, Clone)]
pub struct Champion {
    instructions: Vec<MemoryCell>,
    identity: Option<Identity>,
    is_alive: bool,
    load_index: usize,
}

impl Champion {
    pub fn new(instructions: Vec<MemoryCell>) -> Champion {
        Champion::with_identity_option(None, instructions)
    }

    pub fn with_identity(identity: Identity, instructions: Vec<MemoryCell>) -> Champion {
        Champion::with_identity_option(Some(identity), instructions)
    }

    fn with_identity_option(
        identity: Option<Identity>,
        instructions: Vec<MemoryCell>,
    ) -> Champion {
        Champion {
            instructions,
            identity,
            is_alive: true,
            load_index: 0,
        }
    }

    pub fn instructions(&self) -> &[MemoryCell] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    /// 0-based order in which the virtual machine loaded this champion;
    /// also the value stamped into cells it writes.
    pub fn load_index(&self) -> usize {
        self.load_index
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.identity.as_ref()?.name.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.identity.as_ref()?.author.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.identity.as_ref()?.version.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.identity.as_ref()?.date.as_deref()
    }

    pub fn strategy(&self) -> Option<&str> {
        self.identity.as_ref()?.strategy.as_deref()
    }

    /// Offset of the first executed instruction, relative to wherever
    /// the champion lands in core.
    pub fn origin(&self) -> i32 {
        match &self.identity {
            Some(identity) => identity.origin,
            None => 0,
        }
    }

    pub(crate) fn assign_load_index(&mut self, index: usize) {
        self.load_index = index;
    }

    pub(crate) fn kill(&mut self) {
        self.is_alive = false;
    }
}
