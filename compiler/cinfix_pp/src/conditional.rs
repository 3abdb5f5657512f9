//! The stack of open `#if` blocks.

use crate::error::PreprocessErrorKind;

/// Where a conditional block stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchState {
    /// The current branch is being emitted
    Active,
    /// No branch has been taken yet; a later `#elif` or `#else` may be
    Pending,
    /// A branch was already taken; the rest of the block is skipped
    Done,
    /// The whole block sits inside a skipped region and is never evaluated
    SkippedParent,
}

#[derive(Debug, Clone)]
struct Frame {
    state: BranchState,
    seen_else: bool,
    /// Line of the opening directive
    line: usize,
}

/// Open conditional blocks of one file, innermost last.
#[derive(Debug, Clone)]
pub struct ConditionalStack {
    frames: Vec<Frame>,
    limit: usize,
}

impl ConditionalStack {
    pub fn new(limit: usize) -> Self {
        Self {
            frames: Vec::new(),
            limit,
        }
    }

    /// True when text at this point should be emitted.
    pub fn is_active(&self) -> bool {
        self.frames
            .last()
            .map_or(true, |frame| frame.state == BranchState::Active)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// State of the innermost block, if any.
    pub fn top(&self) -> Option<BranchState> {
        self.frames.last().map(|frame| frame.state)
    }

    /// Opens a block. `condition` is ignored inside a skipped region, where the
    /// caller does not need to evaluate it at all.
    pub fn push(&mut self, condition: bool, line: usize) -> Result<(), PreprocessErrorKind> {
        if self.frames.len() >= self.limit {
            return Err(PreprocessErrorKind::TooManyConditionals(self.limit));
        }
        let state = match (self.is_active(), condition) {
            (false, _) => BranchState::SkippedParent,
            (true, true) => BranchState::Active,
            (true, false) => BranchState::Pending,
        };
        self.frames.push(Frame {
            state,
            seen_else: false,
            line,
        });
        Ok(())
    }

    /// Checks that an `#elif` is allowed here and reports whether its
    /// condition decides anything. Only a pending block evaluates it.
    pub fn elif_needs_condition(&self) -> Result<bool, PreprocessErrorKind> {
        let frame = self.open_frame("elif")?;
        Ok(frame.state == BranchState::Pending)
    }

    pub fn elif(&mut self, condition: bool) -> Result<(), PreprocessErrorKind> {
        let frame = self.open_frame_mut("elif")?;
        frame.state = match frame.state {
            BranchState::Active | BranchState::Done => BranchState::Done,
            BranchState::Pending if condition => BranchState::Active,
            state => state,
        };
        Ok(())
    }

    pub fn else_branch(&mut self) -> Result<(), PreprocessErrorKind> {
        let frame = self.open_frame_mut("else")?;
        frame.seen_else = true;
        frame.state = match frame.state {
            BranchState::Active | BranchState::Done => BranchState::Done,
            BranchState::Pending => BranchState::Active,
            BranchState::SkippedParent => BranchState::SkippedParent,
        };
        Ok(())
    }

    pub fn endif(&mut self) -> Result<(), PreprocessErrorKind> {
        self.frames
            .pop()
            .map(|_| ())
            .ok_or(PreprocessErrorKind::StrayDirective("endif"))
    }

    /// Fails if a block is still open, naming the line that opened it.
    pub fn finish(&self) -> Result<(), PreprocessErrorKind> {
        match self.frames.last() {
            Some(frame) => Err(PreprocessErrorKind::UnterminatedConditional {
                opened_at: frame.line,
            }),
            None => Ok(()),
        }
    }

    fn open_frame(&self, directive: &'static str) -> Result<&Frame, PreprocessErrorKind> {
        let frame = self
            .frames
            .last()
            .ok_or(PreprocessErrorKind::StrayDirective(directive))?;
        if frame.seen_else {
            return Err(PreprocessErrorKind::AfterElse(directive));
        }
        Ok(frame)
    }

    fn open_frame_mut(&mut self, directive: &'static str) -> Result<&mut Frame, PreprocessErrorKind> {
        self.open_frame(directive)?;
        match self.frames.last_mut() {
            Some(frame) => Ok(frame),
            None => unreachable!("open_frame checked the stack"),
        }
    }
}
