use core::ptr::NonNull;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::{
    ecmascript::{execution::agent::Agent, types::language::string::String},
    heap::{impl_index_access, indexes::SourceCodeIndex, CreateHeapData},
};

/// A parsed source text: keeps the source string and the AST arena alive
/// for as long as any function of that source can still run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SourceCode(pub(crate) SourceCodeIndex);

pub struct SourceCodeHeapData {
    /// The source text. As heap strings are never moved or collected, AST
    /// references into this text stay valid.
    pub(crate) source: String,
    /// The arena the AST of this source was allocated in.
    allocator: NonNull<Allocator>,
}

impl core::fmt::Debug for SourceCodeHeapData {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SourceCodeHeapData")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl SourceCodeHeapData {
    /// Free the leaked AST arena.
    ///
    /// ## Safety
    ///
    /// Must be called at most once, and only when no AST reference into
    /// the arena can be used again (heap teardown).
    pub(crate) unsafe fn release_allocator(&mut self) {
        drop(Box::from_raw(self.allocator.as_ptr()));
    }
}

impl SourceCode {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    /// Parse `source` as a script, returning the program and the
    /// [`SourceCode`] that owns its arena.
    ///
    /// ## Safety
    ///
    /// The `'static` lifetimes of the returned [`Program`] are a promise
    /// that the heap keeps this [`SourceCode`] alive for as long as any
    /// AST reference is reachable; the heap never collects source code.
    pub(crate) unsafe fn parse_source(
        agent: &mut Agent,
        source: String,
        strict_mode: bool,
    ) -> Result<(Program<'static>, SourceCode), Vec<OxcDiagnostic>> {
        // SAFETY: The source is an interned heap string; its data is boxed
        // and never moves, and the heap frees strings only on teardown.
        let source_text = unsafe {
            core::mem::transmute::<&str, &'static str>(source.as_str(agent))
        };

        // Strict mode scripts share the module goal's strictness.
        let source_type = if strict_mode {
            SourceType::mjs()
        } else {
            SourceType::cjs()
        };

        let allocator = NonNull::from(Box::leak(Box::<Allocator>::default()));
        // SAFETY: The allocator stays alive until the heap is dropped.
        let alloc = unsafe { &*allocator.as_ptr() };
        let parser_result = Parser::new(alloc, source_text, source_type).parse();

        if parser_result.panicked || !parser_result.errors.is_empty() {
            let errors = parser_result.errors;
            // SAFETY: No AST reference escaped; the arena can be freed.
            drop(unsafe { Box::from_raw(allocator.as_ptr()) });
            return Err(errors);
        }

        let source_code = agent.heap.create(SourceCodeHeapData { source, allocator });
        Ok((parser_result.program, source_code))
    }
}

impl From<SourceCodeIndex> for SourceCode {
    fn from(value: SourceCodeIndex) -> Self {
        SourceCode(value)
    }
}

impl_index_access!(SourceCode, SourceCodeHeapData, source_codes, "SourceCode");
