//! Common test utilities

use sstubs_extract::SstubRecord;

/// A one-line fix patch in the shape the raw dataset uses
pub fn patch(before: &str, after: &str) -> String {
    format!(
        "diff --git a/src/Main.java b/src/Main.java\n\
         --- a/src/Main.java\n\
         +++ b/src/Main.java\n\
         @@ -3,1 +3,1 @@\n\
         -{before}\n\
         +{after}\n"
    )
}

pub fn record(before: &str, after: &str, bug_type: &str) -> SstubRecord {
    SstubRecord::new(patch(before, after), bug_type)
}

/// A small raw dataset covering the interesting extraction outcomes
pub fn sample_records() -> Vec<SstubRecord> {
    vec![
        record("return count - 1;", "return count;", "CHANGE_OPERAND"),
        record("if (a < b) {", "if (a <= b) {", "CHANGE_OPERATOR"),
        record("foo(x);", "bar(x);", "WRONG_FUNCTION_NAME"),
        record("int size = list.size();", "int size = items.size();", "CHANGE_IDENTIFIER"),
        // Untokenizable before-snippet: dropped entirely.
        record("x = a # b;", "x = a + b;", "CHANGE_OPERATOR"),
        // Untokenizable after-snippet: only the buggy side survives.
        record("y = a - b;", "y = a # b;", "CHANGE_OPERATOR"),
    ]
}
