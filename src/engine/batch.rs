// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Batch mode: many calls against one prepared invocation.
//!
//! A batch file is a JSON array with one entry per call. An entry that is an
//! array is that call's argument list; anything else is a single argument,
//! so a lone list argument has to be wrapped in another array.

use std::path::Path;

use serde_json::Value;

use crate::engine::orchestrator::{Orchestrator, PreparedInvocation};
use crate::errors::{WritError, WritResult};
use crate::observability::messages::invocation::{BatchCompleted, BatchRowFailed};
use crate::traits::Runtime;

/// Read a batch file into per-call argument lists.
pub fn load_batch(path: &Path) -> WritResult<Vec<Vec<Value>>> {
    if !path.is_file() {
        return Err(WritError::PathNotFound(path.to_path_buf()));
    }
    let text =
        std::fs::read_to_string(path).map_err(|_| WritError::PathNotFound(path.to_path_buf()))?;
    let document: Value = serde_json::from_str(&text)
        .map_err(|source| WritError::JsonParseFailure { index: 0, source })?;
    batch_rows(document)
}

/// Split a parsed batch document into argument lists.
pub fn batch_rows(document: Value) -> WritResult<Vec<Vec<Value>>> {
    match document {
        Value::Array(entries) => Ok(entries
            .into_iter()
            .map(|entry| match entry {
                Value::Array(args) => args,
                single => vec![single],
            })
            .collect()),
        other => Err(WritError::TypeMismatch {
            position: "batch".to_string(),
            value: other.to_string(),
            expected: "array of calls".to_string(),
        }),
    }
}

/// Run every row in order. A failing row does not stop the batch.
///
/// Each entry is the rendered outcome of the row at the same index.
pub fn run_batch<R: Runtime>(
    orchestrator: &Orchestrator<R>,
    prepared: &PreparedInvocation<R::Module>,
    rows: &[Vec<Value>],
) -> Vec<WritResult<String>> {
    let results: Vec<WritResult<String>> = rows
        .iter()
        .enumerate()
        .map(|(row, args)| {
            let rendered = orchestrator
                .call(prepared, args)
                .and_then(|outcome| outcome.render());
            if let Err(error) = &rendered {
                tracing::warn!("{}", BatchRowFailed { row, error });
            }
            rendered
        })
        .collect();

    tracing::info!(
        "{}",
        BatchCompleted {
            total: results.len(),
            failed: results.iter().filter(|result| result.is_err()).count(),
        }
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::orchestrator::tests::Fixture;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_rows_follow_the_wrapping_convention() {
        let rows = batch_rows(json!([[2, 10], 5, [[1, 2]], "x"])).unwrap();
        assert_eq!(
            rows,
            vec![
                vec![json!(2), json!(10)],
                vec![json!(5)],
                vec![json!([1, 2])],
                vec![json!("x")],
            ]
        );
    }

    #[test]
    fn test_batch_must_be_an_array() {
        assert!(matches!(
            batch_rows(json!({"args": [1]})),
            Err(WritError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_load_batch_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[[\"meow\", 22], [\"purr\", 3]]").unwrap();
        assert_eq!(load_batch(file.path()).unwrap().len(), 2);

        let mut broken = NamedTempFile::new().unwrap();
        broken.write_all(b"[[1, 2]").unwrap();
        assert!(matches!(
            load_batch(broken.path()),
            Err(WritError::JsonParseFailure { .. })
        ));
    }

    #[test]
    fn test_failing_rows_do_not_stop_the_batch() {
        let fixture = Fixture::new();
        let prepared = fixture
            .orchestrator
            .prepare(&fixture.typed("construct-bar"))
            .unwrap();
        let rows = batch_rows(json!([["meow", 22], ["purr", "old"], ["hiss", 1]])).unwrap();

        let results = run_batch(&fixture.orchestrator, &prepared, &rows);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), r#"{"name":"meow","age":22}"#);
        assert!(matches!(results[1], Err(WritError::TypeMismatch { .. })));
        assert_eq!(results[2].as_ref().unwrap(), r#"{"name":"hiss","age":1}"#);
    }

    #[test]
    fn test_plain_batch() {
        let fixture = Fixture::new();
        let prepared = fixture.orchestrator.prepare(&fixture.plain("power-of")).unwrap();
        let rows = batch_rows(json!([[2, 3], [10, 2]])).unwrap();

        let rendered: Vec<_> = run_batch(&fixture.orchestrator, &prepared, &rows)
            .into_iter()
            .map(|result| result.unwrap())
            .collect();
        assert_eq!(rendered, vec!["8".to_string(), "100".to_string()]);
    }
}
