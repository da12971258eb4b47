use super::{execute, Address, Champion, MemoryCell, RandomSource};
use std::collections::VecDeque;

/// How many random candidates the loader samples before giving up on
/// placing a champion.
const PLACEMENT_TRIES: usize = 50;

/// Rejection of a `load_champion` call. Nothing has been written to
/// core when this is returned; the champion travels back to the caller
/// inside the error.
#[derive(Debug)]
pub enum LoadError {
    ExceedsInstructionLimit(Champion),
    CannotPlaceRandomly(Champion),
}

impl LoadError {
    pub fn champion(&self) -> &Champion {
        use LoadError::*;
        match self {
            ExceedsInstructionLimit(champion) => champion,
            CannotPlaceRandomly(champion) => champion,
        }
    }

    pub fn into_champion(self) -> Champion {
        use LoadError::*;
        match self {
            ExceedsInstructionLimit(champion) => champion,
            CannotPlaceRandomly(champion) => champion,
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = self.champion().name().unwrap_or("CHAMPION");
        use LoadError::*;
        match self {
            ExceedsInstructionLimit(champion) => {
                write!(f, "{} EXCEEDS THE INSTRUCTION LIMIT; {} INSTRUCTIONS", name, champion.len())
            }
            CannotPlaceRandomly(_) => {
                write!(f, "NO ROOM TO PLACE {} AFTER {} TRIES", name, PLACEMENT_TRIES)
            }
        }
    }
}

/// The champion and program counter about to execute on the next
/// `step` call.
#[derive(Debug)]
pub struct NextMove<'a> {
    pub champion: &'a Champion,
    pub pointer: Address,
}

/// The MARS proper: owns the core, the loaded champions, and the
/// round-robin scheduler of per-champion task queues.
///
/// A champion's tasks are a FIFO of program counters; the scheduler is
/// a FIFO of (champion, task queue) pairs. One `step` executes one
/// instruction of the front champion's front task, then rotates.
pub struct MarsVm {
    size: usize,
    memory: Vec<MemoryCell>,
    champions: Vec<Champion>,
    starts: Vec<Address>,
    scheduler: VecDeque<(usize, VecDeque<Address>)>,
    winner: Option<usize>,
    random: Box<dyn RandomSource>,
    minimum_spacing: usize,
    instruction_limit: usize,
    separation: usize,
}

impl MarsVm {
    /// A core of `size` cells, zero-filled with `DAT.F #0, #0`.
    pub fn new(size: usize, random: Box<dyn RandomSource>) -> MarsVm {
        MarsVm {
            size,
            memory: vec![MemoryCell::default(); size],
            champions: Vec::new(),
            starts: Vec::new(),
            scheduler: VecDeque::new(),
            winner: None,
            random,
            minimum_spacing: 0,
            instruction_limit: 0,
            separation: 0,
        }
    }

    /// Minimum footprint, in cells, reserved around each champion's
    /// start when checking placement collisions. 0 means the champion's
    /// own length.
    pub fn set_minimum_spacing(&mut self, cells: usize) {
        self.minimum_spacing = cells;
    }

    /// Largest champion `load_champion` accepts. 0 means unlimited.
    pub fn set_instruction_limit(&mut self, count: usize) {
        self.instruction_limit = count;
    }

    /// Fixed distance between consecutive champions' load addresses.
    /// 0 means every champion is placed randomly instead.
    pub fn set_separation(&mut self, cells: usize) {
        self.separation = cells;
    }

    pub fn memory(&self) -> &[MemoryCell] {
        &self.memory
    }

    pub fn champions(&self) -> &[Champion] {
        &self.champions
    }

    pub fn winner(&self) -> Option<&Champion> {
        Some(&self.champions[self.winner?])
    }

    pub fn next_move(&self) -> Option<NextMove> {
        let (index, tasks) = self.scheduler.front()?;
        Some(NextMove {
            champion: &self.champions[*index],
            pointer: *tasks.front()?,
        })
    }

    /// Copies the champion's instructions into core and seeds its task
    /// queue with a single task at its origin. The load address is the
    /// previous champion's start plus the configured separation, or a
    /// randomly sampled free spot when no separation is set.
    pub fn load_champion(&mut self, mut champion: Champion) -> Result<(), LoadError> {
        if self.instruction_limit != 0 && champion.len() > self.instruction_limit {
            return Err(LoadError::ExceedsInstructionLimit(champion));
        }
        let start = if self.separation == 0 || self.champions.is_empty() {
            match self.place_randomly() {
                Some(start) => start,
                None => return Err(LoadError::CannotPlaceRandomly(champion)),
            }
        } else {
            let previous = self.starts[self.starts.len() - 1];
            (previous + self.separation) % self.size
        };
        let index = self.champions.len();
        champion.assign_load_index(index);
        for (offset, cell) in champion.instructions().iter().enumerate() {
            let at = (start + offset) % self.size;
            self.memory[at] = *cell;
            self.memory[at].last_writer = Some(index);
        }
        let origin = (start as i64 + i64::from(champion.origin())).rem_euclid(self.size as i64);
        let mut tasks = VecDeque::new();
        tasks.push_back(origin as Address);
        self.scheduler.push_back((index, tasks));
        self.starts.push(start);
        self.champions.push(champion);
        Ok(())
    }

    fn place_randomly(&mut self) -> Option<Address> {
        for _ in 0..PLACEMENT_TRIES {
            let candidate = self.random.next(0, self.size);
            if !self.collides(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// A candidate collides when it falls inside an already-loaded
    /// champion's forward footprint. The check is directional: it does
    /// not reject a candidate whose own footprint would engulf an
    /// earlier champion's start.
    fn collides(&self, candidate: Address) -> bool {
        self.starts
            .iter()
            .zip(self.champions.iter())
            .any(|(&start, champion)| {
                let footprint = champion.len().max(self.minimum_spacing);
                start <= candidate && candidate < start + footprint
            })
    }

    /// Executes one instruction of the front champion's front task.
    /// A task that fails is not re-queued; a champion whose queue
    /// empties is dead. Once a single champion remains alive it is
    /// recorded as the winner and stepping becomes a no-op.
    pub fn step(&mut self) {
        if self.winner.is_some() {
            return;
        }
        let (index, mut tasks) = match self.scheduler.pop_front() {
            Some(front) => front,
            None => return,
        };
        if let Some(pc) = tasks.pop_front() {
            let outcome = execute(&mut self.memory, pc, index);
            if outcome.success {
                tasks.push_back(outcome.next_pc);
                if let Some(spawned) = outcome.spawned {
                    tasks.push_back(spawned);
                }
            }
        }
        if tasks.is_empty() {
            self.champions[index].kill();
        } else {
            self.scheduler.push_back((index, tasks));
        }
        let mut alive = self
            .champions
            .iter()
            .enumerate()
            .filter(|(_, champion)| champion.is_alive());
        if let (Some((sole, _)), None) = (alive.next(), alive.next()) {
            self.winner = Some(sole);
        }
    }
}
