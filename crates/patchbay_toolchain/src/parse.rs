//! Parsers for the programmer's text output.
//!
//! The vendor tool's wording changes between releases, so these parsers only
//! extract auxiliary data; they are never consulted to decide whether an
//! invocation succeeded.

/// Extracts the first cable address from `quartus_pgm -l` output.
///
/// Cable lines look like `1) USB-Blaster [1-1.5]`: a one-based index, a
/// closing parenthesis, then the cable name and its bus address. Lines that
/// do not carry a recognizable cable token are ignored.
pub fn parse_cable_list(stdout: &str) -> Option<String> {
    for line in stdout.lines() {
        let line = line.trim();
        let Some((index, rest)) = line.split_once(')') else {
            continue;
        };
        if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        let cable = rest.trim();
        if cable.contains("USB-Blaster") || cable.contains("JTAG") {
            return Some(cable.to_string());
        }
    }
    None
}

/// Counts the programmable cores in `quartus_pgm -c <cable> -a` output.
///
/// The chain listing is a header line naming the cable followed by one line
/// per device, then a trailing informational block of `Info`-prefixed lines.
/// The core count is the number of non-blank lines before that block, minus
/// the header.
pub fn parse_chain_core_count(stdout: &str) -> usize {
    stdout
        .lines()
        .take_while(|line| !line.trim_start().starts_with("Info"))
        .filter(|line| !line.trim().is_empty())
        .count()
        .saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cable_list_finds_usb_blaster() {
        let stdout = "\
Info: Running Quartus Prime Programmer
1) USB-Blaster [1-1.5]
";
        assert_eq!(parse_cable_list(stdout), Some("USB-Blaster [1-1.5]".to_string()));
    }

    #[test]
    fn cable_list_returns_first_cable() {
        let stdout = "\
1) USB-Blaster [2-1.5]
2) USB-Blaster II [3-2]
";
        assert_eq!(parse_cable_list(stdout), Some("USB-Blaster [2-1.5]".to_string()));
    }

    #[test]
    fn cable_list_accepts_generic_jtag_cables() {
        let stdout = "1) JTAG Cable [usb-1]\n";
        assert_eq!(parse_cable_list(stdout), Some("JTAG Cable [usb-1]".to_string()));
    }

    #[test]
    fn cable_list_ignores_informational_lines() {
        let stdout = "\
Info (213045): USB-Blaster driver loaded
Warning: something about JTAG
";
        assert_eq!(parse_cable_list(stdout), None);
    }

    #[test]
    fn cable_list_empty_output_finds_nothing() {
        assert_eq!(parse_cable_list(""), None);
    }

    #[test]
    fn chain_count_single_core() {
        let stdout = "\
1) USB-Blaster [1-1.5]
  020F30DD   10M50DAF484(.|ES)/10M50DCF484

Info: Quartus Prime Programmer was successful. 0 errors
Info: Elapsed time: 00:00:01
";
        assert_eq!(parse_chain_core_count(stdout), 1);
    }

    #[test]
    fn chain_count_two_cores() {
        let stdout = "\
1) USB-Blaster [1-1.5]
  020F30DD   10M50DAF484
  020A40DD   EP4CE22F17
Info: Quartus Prime Programmer was successful. 0 errors
";
        assert_eq!(parse_chain_core_count(stdout), 2);
    }

    #[test]
    fn chain_count_header_only_is_zero() {
        let stdout = "1) USB-Blaster [1-1.5]\nInfo: done\n";
        assert_eq!(parse_chain_core_count(stdout), 0);
    }

    #[test]
    fn chain_count_empty_output_is_zero() {
        assert_eq!(parse_chain_core_count(""), 0);
        assert_eq!(parse_chain_core_count("Info: nothing attached\n"), 0);
    }
}
