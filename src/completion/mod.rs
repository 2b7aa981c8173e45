/// Completion-related modules.
///
/// This sub-module groups all completion logic:
/// - **trigger**: Deciding whether the cursor is in a `require(...)` position
/// - **span**: Resolving the replaceable token span for any completion commit
/// - **catalog**: Discovering offerable module specifiers on disk
/// - **assembler**: Merging, ordering, and packaging LSP `CompletionItem`s
/// - **handler**: The `Backend` entry points tying the pipeline together
pub mod assembler;
pub mod catalog;
pub mod handler;
pub mod span;
pub mod trigger;
