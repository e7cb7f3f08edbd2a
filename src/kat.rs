// Reader for the Skein golden KAT files, e.g. skein_golden_kat.txt:
//
// :Skein-256:  256-bit hash, msgLen =     8 bits, data = 'random'
//
// Message data:
//     FB
//
// Result:
//     88 B8 A9 ...
// --------------------------------
//
// MAC records carry a "MAC key = N bytes:" block, tree records are
// recognised by "Tree" in the header and never run.

use anyhow::{anyhow, bail, Context};
use skein3fish::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KatVector {
    pub state_bits: usize,
    pub output_bits: usize,
    pub msg_bits: usize,
    pub msg: Vec<u8>,
    pub mac_key: Option<Vec<u8>>,
    pub result: Vec<u8>,
    pub rest: String,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section { Header, Message, MacKey, Result }

// ----------------------------------------------------------------------------
impl KatVector {
    pub fn is_tree(&self) -> bool {
        self.rest.contains("Tree")
    }

    pub fn is_mac(&self) -> bool {
        self.mac_key.is_some()
    }

    // Hashes the message of the record, the record result is not looked at.
    pub fn compute(&self) -> Result<Vec<u8>, Error> {
        match &self.mac_key {
            Some(key) => self.compute_with(new_mac(self.state_bits, self.output_bits, key)?),
            None => self.compute_with(new_hash(self.state_bits, self.output_bits)?),
        }
    }

    fn compute_with<D: SkeinDigest>(&self, mut d: D) -> Result<Vec<u8>, Error> {
        d.update_bits(&self.msg, self.msg_bits)?;
        Ok(d.finalize())
    }
}

// ----------------------------------------------------------------------------
// ":Skein-512:  384-bit hash, msgLen =   1024 bits, data = 'incrementing'"
// -> (512, 384, 1024, ", data = 'incrementing'")
fn parse_header(line: &str) -> Option<(usize, usize, usize, &str)> {
    let line = line.strip_prefix(":Skein-")?;
    let (state, line) = line.split_once(':')?;
    let (output, line) = line.trim_start().split_once('-')?;
    let line = &line[line.find("msgLen")?..];
    let line = line[line.find('=')? + 1..].trim_start();
    let digits = line.find(|c: char| !c.is_ascii_digit()).unwrap_or(line.len());
    let rest = line[digits..].trim_start().strip_prefix("bits")?;
    Some((state.trim().parse().ok()?, output.trim().parse().ok()?, line[..digits].parse().ok()?, rest))
}

// "MAC key =   65 bytes:"
fn parse_key_header(line: &str) -> Option<usize> {
    let line = line[line.find('=')? + 1..].trim_start();
    let digits = line.find(|c: char| !c.is_ascii_digit()).unwrap_or(line.len());
    line[..digits].parse().ok()
}

fn parse_hex_line(line: &str, dst: &mut Vec<u8>) -> anyhow::Result<()> {
    if line.contains("(none)") {
        return Ok(());
    }
    for token in line.split_whitespace() {
        let b = u8::from_str_radix(token, 16).with_context(|| format!("bad hex byte {:?}", token))?;
        dst.push(b);
    }
    Ok(())
}

fn check_vector(v: &KatVector) -> anyhow::Result<()> {
    if v.msg.len() != v.msg_bits.div_ceil(8) {
        bail!("message of {} bytes for msgLen = {} bits", v.msg.len(), v.msg_bits);
    }
    if v.result.len() != v.output_bits.div_ceil(8) {
        bail!("result of {} bytes for a {}-bit hash", v.result.len(), v.output_bits);
    }
    Ok(())
}

// Splits a KAT file into its records, in file order.
pub fn parse(text: &str) -> anyhow::Result<Vec<KatVector>> {
    let mut vectors = Vec::new();
    let mut current: Option<KatVector> = None;
    let mut key_len = 0;
    let mut section = Section::Header;

    for (n, raw) in text.lines().enumerate() {
        let n = n + 1;
        let line = raw.trim();
        if line.len() <= 1 {
            continue;
        }
        if line.starts_with("------") {
            if let Some(v) = current.take() {
                if let Some(key) = &v.mac_key {
                    if key.len() != key_len {
                        bail!("line {}: MAC key of {} bytes, header says {}", v.line, key.len(), key_len);
                    }
                }
                check_vector(&v).with_context(|| format!("record at line {}", v.line))?;
                vectors.push(v);
            }
            section = Section::Header;
            continue;
        }
        if line.starts_with("Message") {
            section = Section::Message;
            continue;
        }
        if line.starts_with("Result") {
            section = Section::Result;
            continue;
        }
        if line.starts_with("MAC") {
            key_len = parse_key_header(line).ok_or_else(|| anyhow!("line {}: bad MAC key header", n))?;
            let v = current.as_mut().ok_or_else(|| anyhow!("line {}: MAC key outside of a record", n))?;
            v.mac_key = Some(Vec::with_capacity(key_len));
            section = Section::MacKey;
            continue;
        }

        match section {
            Section::Header => {
                let (state_bits, output_bits, msg_bits, rest) =
                    parse_header(line).ok_or_else(|| anyhow!("line {}: bad header {:?}", n, line))?;
                current = Some(KatVector {
                    state_bits, output_bits, msg_bits,
                    rest: rest.to_string(),
                    line: n,
                    ..Default::default()
                });
            }
            Section::Message | Section::MacKey | Section::Result => {
                let v = current.as_mut().ok_or_else(|| anyhow!("line {}: data outside of a record", n))?;
                let dst = match section {
                    Section::Message => &mut v.msg,
                    Section::Result => &mut v.result,
                    _ => v.mac_key.get_or_insert_with(Vec::new),
                };
                parse_hex_line(line, dst).with_context(|| format!("line {}", n))?;
            }
        }
    }
    if current.is_some() {
        bail!("unterminated record at end of file");
    }
    Ok(vectors)
}
