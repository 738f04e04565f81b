//! The conditional-set kernel template.
//!
//! For every index in `[0, N)` the rendered kernel evaluates the CONDITION
//! block and runs the STATEMENT block only when `_cond` is true:
//!
//! ```text
//! //// SUPPORT CODE ///////////      (as comments)
//! //// HANDLE DENORMALS ///////////
//! //// HASH DEFINES ///////////
//! //// POINTERS ///////////
//! //// MAIN CODE ////////////
//! for(int _idx=0; _idx<N; _idx++)
//! {
//!     const int _vectorisation_idx = _idx;
//!     //// CONDITION ///////////
//!     if(_cond) {
//!         //// STATEMENT ///////////
//!     }
//! }
//! ```
//!
//! Iterations share nothing the template declares: `_idx`,
//! `_vectorisation_idx` and the guard's `_cond` all live inside the loop
//! body. Whether iterations may run in parallel depends only on the
//! fragments being index-pure.

use tracing::{debug, trace};

use crate::config::RenderConfig;
use crate::error::Result;
use crate::fragments::{Block, KernelFragments, TripCount};
use crate::insert::CodeWriter;

/// One step of the `main` pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    SupportCode,
    HandleDenormals,
    HashDefines,
    Pointers,
    LoopOpen,
    Condition,
    Statement,
    LoopClose,
}

/// Emission order of [`ConditionalSetTemplate::main`].
pub const MAIN_STAGES: [Stage; 8] = [
    Stage::SupportCode,
    Stage::HandleDenormals,
    Stage::HashDefines,
    Stage::Pointers,
    Stage::LoopOpen,
    Stage::Condition,
    Stage::Statement,
    Stage::LoopClose,
];

/// Renders conditional-set kernels from fragment bundles.
///
/// The template holds only its configuration, so one instance can be shared
/// across threads and used for any number of renders. Rendering is a pure
/// function of the fragments and trip count.
#[derive(Clone, Debug, Default)]
pub struct ConditionalSetTemplate {
    config: RenderConfig,
}

impl ConditionalSetTemplate {
    /// Create a template, rejecting configurations the dialect cannot render.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the full kernel: preamble blocks followed by the loop.
    pub fn main(&self, fragments: &KernelFragments, n: &TripCount) -> String {
        debug!(
            dialect = %self.config.dialect,
            n = %n,
            support = fragments.support_code.len(),
            denormals = fragments.denormals.len(),
            hashdefines = fragments.hashdefines.len(),
            pointers = fragments.pointers.len(),
            condition = fragments.code_lines.condition.len(),
            statement = fragments.code_lines.statement.len(),
            "rendering conditional-set kernel"
        );

        let mut w = CodeWriter::new(&self.config);
        for stage in MAIN_STAGES {
            trace!(?stage, depth = w.depth(), "emit");
            self.emit_stage(&mut w, stage, fragments, n);
        }
        w.finish()
    }

    /// Render only the support declarations, as active code, for a shared
    /// compilation unit.
    pub fn support_code(&self, fragments: &KernelFragments) -> String {
        debug!(
            dialect = %self.config.dialect,
            support = fragments.support_code.len(),
            "rendering support code"
        );
        let mut w = CodeWriter::new(&self.config);
        w.insert_lines(Block::SupportCode.label(), &fragments.support_code);
        w.finish()
    }

    fn emit_stage(
        &self,
        w: &mut CodeWriter<'_>,
        stage: Stage,
        f: &KernelFragments,
        n: &TripCount,
    ) {
        match stage {
            Stage::SupportCode => emit_support_comments(w, f),
            Stage::HandleDenormals => emit_block(w, Block::HandleDenormals, f),
            Stage::HashDefines => emit_block(w, Block::HashDefines, f),
            Stage::Pointers => emit_block(w, Block::Pointers, f),
            Stage::LoopOpen => self.emit_loop_open(w, n),
            Stage::Condition => self.emit_condition(w, f),
            Stage::Statement => self.emit_statement_branch(w, f),
            Stage::LoopClose => w.close(),
        }
    }

    fn emit_loop_open(&self, w: &mut CodeWriter<'_>, n: &TripCount) {
        let dialect = self.config.dialect;
        w.line(dialect.main_marker());
        w.open(dialect.loop_open(n));
        w.line(dialect.index_binding());
    }

    fn emit_condition(&self, w: &mut CodeWriter<'_>, f: &KernelFragments) {
        // validate() guarantees a guard exists when it is enabled.
        let guard = self
            .config
            .guard_condition
            .then(|| self.config.dialect.cond_guard())
            .flatten();

        if let Some((init, _)) = guard {
            w.line(init);
        }
        emit_block(w, Block::Condition, f);
        if let Some((_, check)) = guard {
            w.line(check);
        }
    }

    fn emit_statement_branch(&self, w: &mut CodeWriter<'_>, f: &KernelFragments) {
        w.open([self.config.dialect.branch_open()]);
        emit_block(w, Block::Statement, f);
        w.close();
    }
}

fn emit_support_comments(w: &mut CodeWriter<'_>, f: &KernelFragments) {
    w.insert_lines_commented(Block::SupportCode.label(), &f.support_code);
}

fn emit_block(w: &mut CodeWriter<'_>, block: Block, f: &KernelFragments) {
    w.insert_lines(block.label(), f.lines(block));
}
