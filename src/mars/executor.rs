use super::{Address, AddressMode, MemoryCell, Modifier, Opcode};

/// What one instruction did. `success: false` means the executing task
/// dies (it reached `DAT` or divided by zero); it is an ordinary
/// outcome, not an error. `spawned` carries the extra program counter
/// produced by `SPL` for the caller to enqueue as a new task.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Outcome {
    pub success: bool,
    pub next_pc: Address,
    pub spawned: Option<Address>,
}

/// Decodes and executes the single instruction at `program_counter`,
/// writing provenance for `writer` into every cell it mutates. All
/// returned pointers are already wrapped into `[0, memory.len())`.
///
/// Addressing-mode side effects (pre-decrement, post-increment) happen
/// during operand resolution, before opcode dispatch, and stick even
/// when the opcode itself fails.
pub fn execute(memory: &mut [MemoryCell], program_counter: Address, writer: usize) -> Outcome {
    if memory.is_empty() {
        return Outcome {
            success: false,
            next_pc: 0,
            spawned: None,
        };
    }
    let pc = program_counter % memory.len();
    Executor { memory, pc, writer }.run()
}

struct Executor<'a> {
    memory: &'a mut [MemoryCell],
    pc: Address,
    writer: usize,
}

impl<'a> Executor<'a> {
    fn run(mut self) -> Outcome {
        let op = self.memory[self.pc];
        let a_ptr = self.pointer(op.a_mode, op.a_number);
        let b_ptr = self.pointer(op.b_mode, op.b_number);
        let a_cell = self.cell(a_ptr);
        let b_cell = self.cell(b_ptr);
        let mut success = true;
        let mut next_pc = self.wrap(1);
        let mut spawned = None;
        use Opcode::*;
        match op.opcode {
            Dat => success = false,
            Mov => self.mov(op.modifier, a_cell, b_ptr),
            Add => self.arithmetic(op.modifier, a_cell, b_cell, b_ptr, i32::wrapping_add),
            Sub => self.arithmetic(op.modifier, a_cell, b_cell, b_ptr, i32::wrapping_sub),
            Mul => self.arithmetic(op.modifier, a_cell, b_cell, b_ptr, i32::wrapping_mul),
            Div => success = self.division(op.modifier, a_cell, b_cell, b_ptr, i32::wrapping_div),
            Mod => success = self.division(op.modifier, a_cell, b_cell, b_ptr, i32::wrapping_rem),
            Jmp => next_pc = self.wrap(a_ptr),
            Jmz => {
                if selected_fields(op.modifier, b_cell, is_zero, both) {
                    next_pc = self.wrap(a_ptr);
                }
            }
            Jmn => {
                if selected_fields(op.modifier, b_cell, is_non_zero, either) {
                    next_pc = self.wrap(a_ptr);
                }
            }
            Djn => {
                let decremented = self.decrement(op.modifier, b_cell, b_ptr);
                if selected_fields(op.modifier, decremented, is_non_zero, either) {
                    next_pc = self.wrap(a_ptr);
                }
            }
            Cmp => {
                if compares_equal(op.modifier, a_cell, b_cell) {
                    next_pc = self.wrap(2);
                }
            }
            Slt => {
                if strictly_less(op.modifier, a_cell, b_cell) {
                    next_pc = self.wrap(2);
                }
            }
            Spl => spawned = Some(self.wrap(a_ptr)),
        }
        Outcome {
            success,
            next_pc,
            spawned,
        }
    }

    /// Turns an operand into a pointer relative to the program counter,
    /// performing the pre-decrement / post-increment side effect for
    /// the indirect modes.
    fn pointer(&mut self, mode: AddressMode, number: i32) -> i64 {
        use AddressMode::*;
        match mode {
            Immediate => 0,
            Direct => i64::from(number),
            Indirect | Decrement | Increment => {
                let primary = i64::from(number);
                let mut secondary = self.cell(primary).b_number;
                if mode == Decrement {
                    secondary = secondary.wrapping_sub(1);
                    self.write_b(primary, secondary);
                }
                let ptr = primary + i64::from(secondary);
                if mode == Increment {
                    self.write_b(primary, secondary.wrapping_add(1));
                }
                ptr
            }
        }
    }

    fn wrap(&self, pointer: i64) -> Address {
        let size = self.memory.len() as i64;
        (self.pc as i64 + pointer).rem_euclid(size) as Address
    }

    fn cell(&self, pointer: i64) -> MemoryCell {
        self.memory[self.wrap(pointer)]
    }

    fn write_a(&mut self, pointer: i64, value: i32) {
        let at = self.wrap(pointer);
        self.memory[at].a_number = value;
        self.memory[at].last_writer = Some(self.writer);
    }

    fn write_b(&mut self, pointer: i64, value: i32) {
        let at = self.wrap(pointer);
        self.memory[at].b_number = value;
        self.memory[at].last_writer = Some(self.writer);
    }

    fn mov(&mut self, modifier: Modifier, a: MemoryCell, target: i64) {
        use Modifier::*;
        match modifier {
            I => {
                let at = self.wrap(target);
                self.memory[at] = a;
                self.memory[at].last_writer = Some(self.writer);
            }
            A => self.write_a(target, a.a_number),
            B => self.write_b(target, a.b_number),
            AB => self.write_b(target, a.a_number),
            BA => self.write_a(target, a.b_number),
            F => {
                self.write_a(target, a.a_number);
                self.write_b(target, a.b_number);
            }
            X => {
                self.write_a(target, a.b_number);
                self.write_b(target, a.a_number);
            }
        }
    }

    fn arithmetic(
        &mut self,
        modifier: Modifier,
        a: MemoryCell,
        b: MemoryCell,
        target: i64,
        op: fn(i32, i32) -> i32,
    ) {
        use Modifier::*;
        match modifier {
            A => self.write_a(target, op(b.a_number, a.a_number)),
            B => self.write_b(target, op(b.b_number, a.b_number)),
            AB => self.write_b(target, op(b.b_number, a.a_number)),
            BA => self.write_a(target, op(b.a_number, a.b_number)),
            F | I => {
                self.write_a(target, op(b.a_number, a.a_number));
                self.write_b(target, op(b.b_number, a.b_number));
            }
            X => {
                self.write_a(target, op(b.b_number, a.a_number));
                self.write_b(target, op(b.a_number, a.b_number));
            }
        }
    }

    /// Like `arithmetic` but the whole instruction fails, with no write
    /// at all, when any relevant divisor field is zero.
    fn division(
        &mut self,
        modifier: Modifier,
        a: MemoryCell,
        b: MemoryCell,
        target: i64,
        op: fn(i32, i32) -> i32,
    ) -> bool {
        use Modifier::*;
        match modifier {
            A | B | AB | BA => {
                let divisor = match modifier {
                    A | AB => a.a_number,
                    _ => a.b_number,
                };
                if divisor == 0 {
                    return false;
                }
            }
            F | I | X => {
                if a.a_number == 0 || a.b_number == 0 {
                    return false;
                }
            }
        }
        self.arithmetic(modifier, a, b, target, op);
        true
    }

    fn decrement(&mut self, modifier: Modifier, mut b: MemoryCell, target: i64) -> MemoryCell {
        use Modifier::*;
        match modifier {
            A | BA => {
                b.a_number = b.a_number.wrapping_sub(1);
                self.write_a(target, b.a_number);
            }
            B | AB => {
                b.b_number = b.b_number.wrapping_sub(1);
                self.write_b(target, b.b_number);
            }
            F | X | I => {
                b.a_number = b.a_number.wrapping_sub(1);
                b.b_number = b.b_number.wrapping_sub(1);
                self.write_a(target, b.a_number);
                self.write_b(target, b.b_number);
            }
        }
        b
    }
}

fn is_zero(number: i32) -> bool {
    number == 0
}

fn is_non_zero(number: i32) -> bool {
    number != 0
}

fn both(a: bool, b: bool) -> bool {
    a && b
}

fn either(a: bool, b: bool) -> bool {
    a || b
}

fn selected_fields(
    modifier: Modifier,
    b: MemoryCell,
    test: fn(i32) -> bool,
    combine: fn(bool, bool) -> bool,
) -> bool {
    use Modifier::*;
    match modifier {
        A | BA => test(b.a_number),
        B | AB => test(b.b_number),
        F | X | I => combine(test(b.a_number), test(b.b_number)),
    }
}

fn compares_equal(modifier: Modifier, a: MemoryCell, b: MemoryCell) -> bool {
    use Modifier::*;
    match modifier {
        A => b.a_number == a.a_number,
        B => b.b_number == a.b_number,
        AB => b.b_number == a.a_number,
        BA => b.a_number == a.b_number,
        F => b.a_number == a.a_number && b.b_number == a.b_number,
        X => b.b_number == a.a_number && b.a_number == a.b_number,
        I => b == a,
    }
}

fn strictly_less(modifier: Modifier, a: MemoryCell, b: MemoryCell) -> bool {
    use Modifier::*;
    match modifier {
        A => a.a_number < b.a_number,
        B => a.b_number < b.b_number,
        AB => a.a_number < b.b_number,
        BA => a.b_number < b.a_number,
        F | I => a.a_number < b.a_number && a.b_number < b.b_number,
        X => a.b_number < b.a_number && a.a_number < b.b_number,
    }
}
