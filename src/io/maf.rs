use std::io::BufRead;

use crate::alignment::{AlignedSequence, AlignmentBlock};
use crate::feature::Strand;
use crate::{Error, Result};

/// Streaming reader yielding one [`AlignmentBlock`] per MAF `a` paragraph.
///
/// Only `a` and `s` lines are interpreted; `#` comments and `i`, `e`, `q`
/// lines are skipped. Blocks without any `s` line are dropped.
#[derive(Debug)]
pub struct MafReader<R> {
    reader: R,
    line_no: usize,
    buffer: String,
    pending_score: Option<Option<f64>>,
    done: bool,
}

impl<R: BufRead> MafReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buffer: String::new(),
            pending_score: None,
            done: false,
        }
    }

    /// Read the next non-empty block, or `None` at end of input.
    pub fn read_block(&mut self) -> Result<Option<AlignmentBlock>> {
        let mut current: Option<AlignmentBlock> = self
            .pending_score
            .take()
            .map(new_block);

        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                self.done = true;
                return Ok(current.filter(|b| b.number_of_sequences() > 0));
            }
            self.line_no += 1;
            let line = self.buffer.trim();

            if line.is_empty() {
                if let Some(block) = current.take() {
                    if block.number_of_sequences() > 0 {
                        return Ok(Some(block));
                    }
                }
                continue;
            }
            if line.starts_with('#') {
                continue;
            }

            if line == "a" || line.starts_with("a ") {
                let score = parse_score(line, self.line_no)?;
                match current.take() {
                    Some(block) if block.number_of_sequences() > 0 => {
                        self.pending_score = Some(score);
                        return Ok(Some(block));
                    }
                    _ => current = Some(new_block(score)),
                }
            } else if line.starts_with("s ") {
                let sequence = parse_s_line(line, self.line_no)?;
                let line_no = self.line_no;
                match current.as_mut() {
                    Some(block) => block.push(sequence).map_err(|err| Error::Parse {
                        line: line_no,
                        message: err.to_string(),
                    })?,
                    None => {
                        return Err(Error::Parse {
                            line: line_no,
                            message: "'s' line outside of an alignment block".to_string(),
                        })
                    }
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for MafReader<R> {
    type Item = Result<AlignmentBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_block() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => None,
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

fn new_block(score: Option<f64>) -> AlignmentBlock {
    match score {
        Some(score) => AlignmentBlock::new().with_score(score),
        None => AlignmentBlock::new(),
    }
}

/// `a score=1234.5 pass=2`
fn parse_score(line: &str, line_no: usize) -> Result<Option<f64>> {
    for part in line.split_whitespace() {
        if let Some(value) = part.strip_prefix("score=") {
            return value.parse().map(Some).map_err(|_| Error::Parse {
                line: line_no,
                message: format!("invalid score '{value}'"),
            });
        }
    }
    Ok(None)
}

/// `s src start size strand srcSize text`
fn parse_s_line(line: &str, line_no: usize) -> Result<AlignedSequence> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 7 {
        return Err(Error::Parse {
            line: line_no,
            message: format!("expected 7 fields in 's' line, found {}", fields.len()),
        });
    }

    let number = |idx: usize, name: &str| -> Result<u64> {
        fields[idx].parse().map_err(|_| Error::Parse {
            line: line_no,
            message: format!("invalid {name} '{}'", fields[idx]),
        })
    };
    let start = number(2, "start")?;
    let size = number(3, "size")?;
    let src_size = number(5, "srcSize")?;
    let strand = match fields[4] {
        "+" => Strand::Plus,
        "-" => Strand::Minus,
        other => {
            return Err(Error::Parse {
                line: line_no,
                message: format!("invalid strand '{other}'"),
            })
        }
    };

    Ok(AlignedSequence::new(fields[1], fields[6].as_bytes()).with_coordinates(
        start, size, strand, src_size,
    ))
}
