//! The target emitters.
//!
//! Each target is a unit struct implementing [`Grammar`](crate::Grammar) and
//! [`Target`](crate::Target). Targets only spell things; all branching on
//! body mode and header state happens in the shared compilers.

mod c_libcurl;
mod go_native;
mod js_fetch;
mod js_jquery;
mod nodejs_native;
mod php_curl;
mod swift_urlsession;

pub use c_libcurl::CLibcurl;
pub use go_native::GoNative;
pub use js_fetch::JsFetch;
pub use js_jquery::JsJquery;
pub use nodejs_native::NodejsNative;
pub use php_curl::PhpCurl;
pub use swift_urlsession::SwiftUrlSession;

use crate::fragment::CodeBlock;
use crate::target::Target;

/// Boundary used by targets that write multipart bodies by hand.
pub const MULTIPART_BOUNDARY: &str = "----WebKitFormBoundary7MA4YWxkTrZu0gW";

/// Every target, in canonical order.
pub fn all() -> Vec<Box<dyn Target>> {
    vec![
        Box::new(GoNative),
        Box::new(JsFetch),
        Box::new(JsJquery),
        Box::new(NodejsNative),
        Box::new(PhpCurl),
        Box::new(CLibcurl),
        Box::new(SwiftUrlSession),
    ]
}

/// Milliseconds as a decimal count of seconds: `3000` gives `3`, `1500`
/// gives `1.5`.
pub(crate) fn seconds(ms: u64) -> String {
    (ms as f64 / 1000.0).to_string()
}

/// Join object/array members, appending `separator` to every member but the
/// last. Empty members are skipped.
pub(crate) fn join_members(members: Vec<CodeBlock>, separator: &str, depth: usize) -> CodeBlock {
    let members: Vec<CodeBlock> = members.into_iter().filter(|m| !m.is_empty()).collect();
    let mut joined = CodeBlock::new();
    let last = members.len().saturating_sub(1);
    for (i, mut member) in members.into_iter().enumerate() {
        if i < last {
            member.suffix_last(separator);
        }
        joined.append(&member, depth);
    }
    joined
}

/// Render `block` followed by a blank line, or nothing when it is empty.
pub(crate) fn section(out: &mut CodeBlock, block: &CodeBlock, depth: usize) {
    if !block.is_empty() {
        out.append(block, depth);
        out.blank();
    }
}
