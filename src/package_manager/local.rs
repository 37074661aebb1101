//! 本地仓库搜索 (pacman -Ss)

use super::query::Query;
use super::types::{SearchResult, Source};
use std::io::{BufRead, BufReader};

pub trait LocalSource {
    /// 搜索本地仓库索引；无法启动或无输出时返回空列表
    fn search(&self, query: &Query) -> Vec<SearchResult>;
}

/// 调用原生包管理器 `-Ss` 子命令的本地源
#[derive(Debug, Clone)]
pub struct PacmanSearch {
    program: String,
    cap: usize,
}

impl PacmanSearch {
    pub fn new(program: impl Into<String>, cap: usize) -> Self {
        Self {
            program: program.into(),
            cap,
        }
    }
}

impl LocalSource for PacmanSearch {
    fn search(&self, query: &Query) -> Vec<SearchResult> {
        // 退出码不作为失败信号，只看输出；子进程不得读取 raw 模式下的终端
        let reader = match duct::cmd(self.program.as_str(), ["-Ss", query.as_str()])
            .stdin_null()
            .stderr_null()
            .unchecked()
            .reader()
        {
            Ok(reader) => reader,
            Err(e) => {
                log::warn!("无法启动 {} -Ss: {}", self.program, e);
                return Vec::new();
            }
        };

        let results = parse_search_lines(BufReader::new(reader), self.cap);
        log::info!("{} -Ss {:?}: {} 条结果", self.program, query.as_str(), results.len());
        results
    }
}

/// 逐行解析 `-Ss` 输出。
///
/// 非缩进行是一条结果（整行作为 name），紧随其后的缩进行作为它的描述；
/// 没有前置条目的缩进行单独成为一条结果。最多返回 cap 条。
pub fn parse_search_lines<R: BufRead>(reader: R, cap: usize) -> Vec<SearchResult> {
    let mut results = Vec::new();
    if cap == 0 {
        return results;
    }
    let mut pending: Option<String> = None;

    for chunk in reader.split(b'\n') {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("读取搜索输出失败: {}", e);
                break;
            }
        };
        let decoded = String::from_utf8_lossy(&bytes);
        let line = decoded.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let indented = line.starts_with(' ') || line.starts_with('\t');

        match (pending.take(), indented) {
            (Some(header), true) => {
                results.push(SearchResult::new(Source::Local, &header, Some(line)));
            }
            (Some(header), false) => {
                results.push(SearchResult::new(Source::Local, &header, None));
                pending = Some(line.to_string());
            }
            (None, true) => {
                results.push(SearchResult::new(Source::Local, line.trim(), None));
            }
            (None, false) => {
                pending = Some(line.to_string());
            }
        }

        if results.len() >= cap {
            results.truncate(cap);
            return results;
        }
    }

    if let Some(header) = pending {
        results.push(SearchResult::new(Source::Local, &header, None));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_manager::types::MAX_RESULTS;
    use std::io::Cursor;

    const PACMAN_OUTPUT: &str = "extra/vim 9.1.0-1 [installed]\n    Vi Improved, a highly configurable text editor\nextra/gvim 9.1.0-1\n    Vi Improved, GTK3 UI\n";

    #[test]
    fn pairs_header_with_indented_description() {
        let results = parse_search_lines(Cursor::new(PACMAN_OUTPUT), MAX_RESULTS);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name(), "extra/vim 9.1.0-1 [installed]");
        assert_eq!(
            results[0].description(),
            "Vi Improved, a highly configurable text editor"
        );
        assert_eq!(results[1].install_target(), "extra/gvim");
        assert!(results.iter().all(|r| r.source() == Source::Local));
    }

    #[test]
    fn description_rows_are_never_install_targets() {
        let input = "extra/vim 9.1.0-1\n    Vi Improved\nextra/gvim 9.1.0-1\n";
        let results = parse_search_lines(Cursor::new(input), MAX_RESULTS);
        let targets: Vec<_> = results.iter().map(|r| r.install_target()).collect();
        assert_eq!(targets, vec!["extra/vim", "extra/gvim"]);
        assert_eq!(results[0].description(), "Vi Improved");
        assert_eq!(results[1].description(), "N/A");
    }

    #[test]
    fn plain_lines_become_one_result_each() {
        let input = "vim: editor\r\nneovim: fork\n\nvi: classic\n";
        let results = parse_search_lines(Cursor::new(input), MAX_RESULTS);
        let names: Vec<_> = results.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["vim: editor", "neovim: fork", "vi: classic"]);
        assert!(results.iter().all(|r| r.description() == "N/A"));
    }

    #[test]
    fn orphan_indented_line_is_kept() {
        let results = parse_search_lines(Cursor::new("   stray\ncore/a 1\n"), MAX_RESULTS);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name(), "stray");
    }

    #[test]
    fn output_is_capped() {
        let input: String = (0..1000).map(|i| format!("extra/p{i} 1.0\n    d\n")).collect();
        let results = parse_search_lines(Cursor::new(input), MAX_RESULTS);
        assert_eq!(results.len(), MAX_RESULTS);
        assert_eq!(results[MAX_RESULTS - 1].install_target(), "extra/p199");
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let input: &[u8] = b"extra/caf\xe9 1.0\n";
        let results = parse_search_lines(Cursor::new(input), MAX_RESULTS);
        assert_eq!(results.len(), 1);
        assert!(results[0].name().starts_with("extra/caf"));
    }

    #[test]
    fn empty_output_gives_no_results() {
        assert!(parse_search_lines(Cursor::new(""), MAX_RESULTS).is_empty());
    }

    #[test]
    fn missing_program_degrades_to_empty() {
        let source = PacmanSearch::new("definitely-not-a-package-manager-xyz", MAX_RESULTS);
        let query = Query::parse("vim").unwrap();
        assert!(source.search(&query).is_empty());
    }
}
