#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary tool output must never panic or scan past its input
    let record = csx::query::parse_line(data);
    assert!(record.file.as_os_str().len() < csx::query::parser::FILE_CAPACITY);
    assert!(record.symbol_scope.len() < csx::query::parser::SCOPE_CAPACITY);
    assert!(record.context.len() < csx::query::parser::CONTEXT_CAPACITY);

    let _ = csx::query::build_records(data, csx::query::count_lines(data));
});
