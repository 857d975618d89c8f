use crate::domain::{PipeError, PipeResult};
use std::collections::HashMap;

/// Block shape of a procpar parameter, keyed by parameter name.
///
/// Most parameters use a rigid three-line block: key line, value line whose
/// first token is the element count, `0` terminator line. A few display
/// group parameters instead carry a variable number of data lines closed by
/// an inclusive `0` terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BlockLayout {
    FixedStride,
    CountedList,
}

impl BlockLayout {
    pub(super) fn for_parameter(name: &str) -> Self {
        match name {
            "saveglobal_" | "dgs" | "dg2" => Self::CountedList,
            _ => Self::FixedStride,
        }
    }
}

pub(super) fn parse_source(source: &str) -> PipeResult<HashMap<String, Vec<String>>> {
    let lines: Vec<&str> = source.lines().collect();
    let mut parameters = HashMap::new();
    let mut index = 0;

    while index < lines.len() {
        let Some(key) = lines[index].split_whitespace().next() else {
            return Err(block_error(
                index,
                "expected a parameter key line, found a blank line",
            ));
        };

        // Some instrument files carry stray separator lines whose first
        // token is "0" between parameter blocks; skip them without
        // inferring stronger semantics.
        if key == "0" {
            index += 1;
            continue;
        }

        let values = match BlockLayout::for_parameter(key) {
            BlockLayout::FixedStride => {
                let value_line = lines.get(index + 1).ok_or_else(|| {
                    block_error(index, format!("parameter '{key}' has no value line"))
                })?;
                let (_, value) = value_line.trim().split_once(' ').ok_or_else(|| {
                    block_error(
                        index + 1,
                        format!("value line of parameter '{key}' lacks an element count"),
                    )
                })?;
                // Key line, value line, terminator line.
                index += 3;
                vec![value.to_string()]
            }
            BlockLayout::CountedList => {
                index += 1;
                let mut values = Vec::new();
                let mut first_row = true;
                while index < lines.len() && lines[index].trim() != "0" {
                    let trimmed = lines[index].trim();
                    if first_row {
                        // The first token of the first data row is the
                        // element count, not data.
                        values.extend(trimmed.split_whitespace().skip(1).map(str::to_string));
                        first_row = false;
                    } else {
                        values.push(trimmed.to_string());
                    }
                    index += 1;
                }
                // Inclusive terminator.
                if index < lines.len() {
                    index += 1;
                }
                values
            }
        };

        parameters.insert(key.to_string(), values);
    }

    Ok(parameters)
}

fn block_error(line_index: usize, message: impl Into<String>) -> PipeError {
    PipeError::input_validation(
        "INPUT.PROCPAR_BLOCK",
        format!("line {}: {}", line_index + 1, message.into()),
    )
}

#[cfg(test)]
mod tests {
    use super::{BlockLayout, parse_source};

    #[test]
    fn display_group_parameters_use_the_counted_list_layout() {
        assert_eq!(
            BlockLayout::for_parameter("saveglobal_"),
            BlockLayout::CountedList
        );
        assert_eq!(BlockLayout::for_parameter("dgs"), BlockLayout::CountedList);
        assert_eq!(BlockLayout::for_parameter("dg2"), BlockLayout::CountedList);
        assert_eq!(BlockLayout::for_parameter("np"), BlockLayout::FixedStride);
    }

    #[test]
    fn fixed_stride_block_strips_the_count_token() {
        let parameters = parse_source("np 1 1\n1 2048\n0\n").expect("block should parse");
        assert_eq!(parameters["np"], vec!["2048".to_string()]);
    }

    #[test]
    fn counted_list_block_reads_until_the_inclusive_terminator() {
        let source = "dgs 2\n3 first\nsecond line\nthird\n0\nnp 1 1\n1 2048\n0\n";
        let parameters = parse_source(source).expect("blocks should parse");
        assert_eq!(
            parameters["dgs"],
            vec![
                "first".to_string(),
                "second line".to_string(),
                "third".to_string()
            ]
        );
        assert_eq!(parameters["np"], vec!["2048".to_string()]);
    }

    #[test]
    fn stray_zero_token_lines_between_blocks_are_skipped() {
        let source = "0\n0 3 2\nsw 1 1\n1 7200.0\n0\n";
        let parameters = parse_source(source).expect("blocks should parse");
        assert_eq!(parameters["sw"], vec!["7200.0".to_string()]);
    }

    #[test]
    fn truncated_fixed_stride_block_fails_loudly() {
        let error = parse_source("np 1 1\n").expect_err("missing value line should fail");
        assert_eq!(error.placeholder(), "INPUT.PROCPAR_BLOCK");
    }

    #[test]
    fn value_line_without_a_count_token_fails_loudly() {
        let error = parse_source("np 1 1\n2048\n0\n").expect_err("misaligned block should fail");
        assert_eq!(error.placeholder(), "INPUT.PROCPAR_BLOCK");
    }

    #[test]
    fn blank_key_line_fails_loudly() {
        let error = parse_source("np 1 1\n1 2048\n0\n\nsw 1 1\n1 7200.0\n0\n")
            .expect_err("blank key line should fail");
        assert_eq!(error.placeholder(), "INPUT.PROCPAR_BLOCK");
    }
}
