#![no_main]
use libfuzzer_sys::fuzz_target;
use tscript_lexer::{tokenize, TokenCursor};
use tscript_symbols::SymbolTree;

fuzz_target!(|data: &[u8]| {
    // Keep inputs bounded to avoid pathological memory usage.
    if data.is_empty() || data.len() > 100000 {
        return;
    }

    let text = match std::str::from_utf8(data) {
        Ok(text) => text,
        Err(_) => return,
    };

    let tokens = tokenize(text);
    let tree = SymbolTree::build(&tokens);

    // Query every token position for crash-safety of the resolver.
    for index in 0..tokens.len() {
        let cursor = TokenCursor::at(&tokens, index);
        for candidate in tree.completions(&cursor) {
            let _ = tree.describe(&candidate);
        }
        let _ = tree.describe(&tree.hover_lookup(&cursor));
    }
});
