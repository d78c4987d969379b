use super::EvalErr;

pub const DEFAULT_CAPACITY: usize = 1024;

/// Bounded operand stack. Pushing past capacity is a fault, never growth.
#[derive(Clone, Debug)]
pub struct Stack {
    data: Vec<i32>,
    capacity: usize,
}

impl Stack {
    pub fn new() -> Self {
        Stack::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Stack {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: i32) -> Result<(), EvalErr> {
        if self.data.len() >= self.capacity {
            return Err(EvalErr::StackOverflow);
        }

        self.data.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<i32, EvalErr> {
        self.data.pop().ok_or(EvalErr::StackUnderflow)
    }

    /// Contents from top to bottom.
    pub fn peek_all(&self) -> impl Iterator<Item = i32> + '_ {
        self.data.iter().rev().copied()
    }

    /// Contents from bottom to top.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Stack {
    fn default() -> Self {
        Stack::new()
    }
}

#[test]
fn pops_in_reverse_push_order() {
    let mut stack = Stack::new();
    for value in &[1, -2, 3, 40, 0] {
        stack.push(*value).unwrap();
    }

    let popped = (0..5).map(|_| stack.pop().unwrap()).collect::<Vec<_>>();
    assert_eq!(popped, vec![0, 40, 3, -2, 1]);
    assert!(stack.is_empty());
}

#[test]
fn overflow_at_capacity() {
    let mut stack = Stack::new();
    for i in 0..DEFAULT_CAPACITY {
        stack.push(i as i32).unwrap();
    }

    match stack.push(1) {
        Err(EvalErr::StackOverflow) => (),
        other => panic!("expected overflow, got {:?}", other),
    }
    assert_eq!(stack.len(), DEFAULT_CAPACITY);
}

#[test]
fn underflow_when_empty() {
    let mut stack = Stack::with_capacity(4);
    stack.push(9).unwrap();
    assert_eq!(stack.pop().unwrap(), 9);

    match stack.pop() {
        Err(EvalErr::StackUnderflow) => (),
        other => panic!("expected underflow, got {:?}", other),
    }
}

#[test]
fn peek_all_is_top_first_and_leaves_stack_alone() {
    let mut stack = Stack::new();
    stack.push(1).unwrap();
    stack.push(2).unwrap();
    stack.push(3).unwrap();

    assert_eq!(stack.peek_all().collect::<Vec<_>>(), vec![3, 2, 1]);
    assert_eq!(stack.as_slice(), &[1, 2, 3]);
}
