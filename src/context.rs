//! Entry points for reading constraint systems and vectors.

use crate::frontend::parser::Parser;
use crate::frontend::vector::read_polylib_vector;
use crate::frontend::InputFormat;
use crate::polyhedral::basic_map::BasicMap;
use crate::polyhedral::map::Map;
use crate::polyhedral::set::{BasicSet, Set};
use crate::polyhedral::vec::IntVec;
use crate::utils::errors::{ParseErrorKind, PolyResult};
use crate::ReadConfig;
use log::debug;
use std::io::Read;

/// Reader settings shared by all entry points.
///
/// Every read starts from scratch; nothing carries over between calls, so
/// one context can serve any number of reads.
#[derive(Debug, Clone, Default)]
pub struct Context {
    config: ReadConfig,
}

impl Context {
    /// A context reading with `config`.
    pub fn new(config: ReadConfig) -> Self {
        Self { config }
    }

    /// The configuration every reader of this context uses.
    pub fn config(&self) -> &ReadConfig {
        &self.config
    }

    /// Run `read` over `source`, then apply the trailing-input policy.
    fn with_parser<T>(
        &self,
        source: &str,
        read: impl FnOnce(&mut Parser<'_>) -> PolyResult<T>,
    ) -> PolyResult<T> {
        let mut parser = Parser::new(source, self.config.clone());
        let value = read(&mut parser)?;
        parser.finish()?;
        Ok(value)
    }

    /// Read a single basic map. `nparam` is the expected parameter count,
    /// or `None` to take whatever the input declares.
    pub fn read_basic_map_from_str(&self, source: &str, nparam: Option<usize>) -> PolyResult<BasicMap> {
        self.with_parser(source, |p| p.read_basic_map(nparam))
    }

    /// Read all of `input`, then a single basic map from it.
    pub fn read_basic_map_from_file(&self, input: impl Read, nparam: Option<usize>) -> PolyResult<BasicMap> {
        let source = read_all(input)?;
        self.read_basic_map_from_str(&source, nparam)
    }

    /// Read a single basic set; the input must not declare input dimensions.
    pub fn read_basic_set_from_str(&self, source: &str, nparam: Option<usize>) -> PolyResult<BasicSet> {
        self.with_parser(source, |p| {
            let bmap = p.read_basic_map(nparam)?;
            BasicSet::try_from(bmap).map_err(|bmap| {
                p.stream.error(
                    None,
                    ParseErrorKind::NotASet,
                    format!("expected a set, found a map in space {}", bmap.space()),
                )
            })
        })
    }

    /// Read all of `input`, then a single basic set from it.
    pub fn read_basic_set_from_file(&self, input: impl Read, nparam: Option<usize>) -> PolyResult<BasicSet> {
        let source = read_all(input)?;
        self.read_basic_set_from_str(&source, nparam)
    }

    /// Read a union of basic maps.
    pub fn read_map_from_str(&self, source: &str, nparam: Option<usize>) -> PolyResult<Map> {
        self.with_parser(source, |p| p.read_map(nparam))
    }

    /// Read all of `input`, then a union of basic maps from it.
    pub fn read_map_from_file(&self, input: impl Read, nparam: Option<usize>) -> PolyResult<Map> {
        let source = read_all(input)?;
        self.read_map_from_str(&source, nparam)
    }

    /// Read a union of basic sets.
    pub fn read_set_from_str(&self, source: &str, nparam: Option<usize>) -> PolyResult<Set> {
        self.with_parser(source, |p| {
            let map = p.read_map(nparam)?;
            Set::try_from(map).map_err(|map| {
                p.stream.error(
                    None,
                    ParseErrorKind::NotASet,
                    format!("expected a set, found a map in space {}", map.space()),
                )
            })
        })
    }

    /// Read all of `input`, then a union of basic sets from it.
    pub fn read_set_from_file(&self, input: impl Read, nparam: Option<usize>) -> PolyResult<Set> {
        let source = read_all(input)?;
        self.read_set_from_str(&source, nparam)
    }

    /// Read a dense integer vector in the given format.
    pub fn read_vector_from_str(&self, source: &str, format: InputFormat) -> PolyResult<IntVec> {
        match format {
            InputFormat::PolyLib => read_polylib_vector(source),
            InputFormat::Isl => {
                let parser = Parser::new(source, self.config.clone());
                Err(parser.stream.error(
                    None,
                    ParseErrorKind::UnsupportedFormat,
                    format!("vectors cannot be read in {} format", format),
                ))
            }
        }
    }

    /// Read all of `input`, then a vector from it.
    pub fn read_vector_from_file(&self, input: impl Read, format: InputFormat) -> PolyResult<IntVec> {
        let source = read_all(input)?;
        self.read_vector_from_str(&source, format)
    }
}

fn read_all(mut input: impl Read) -> PolyResult<String> {
    let mut source = String::new();
    input.read_to_string(&mut source)?;
    debug!("read {} bytes of input", source.len());
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_basic_set_rejects_maps() {
        let ctx = Context::default();
        let err = ctx.read_basic_set_from_str("{[i] -> [j]}", None).unwrap_err();
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::NotASet));
        assert!(ctx.read_basic_set_from_str("{[i] : i >= 0}", None).is_ok());
    }

    #[test]
    fn test_set_rejects_maps() {
        let ctx = Context::default();
        let err = ctx.read_set_from_str("[n] -> {[i] -> [j] : i <= n}", None).unwrap_err();
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::NotASet));
    }

    #[test]
    fn test_read_from_file() {
        let ctx = Context::default();
        let bmap = ctx
            .read_basic_map_from_file(Cursor::new("{[i] -> [j] : j = i + 1}"), None)
            .unwrap();
        assert_eq!(bmap.n_eq(), 1);

        let vec = ctx
            .read_vector_from_file(Cursor::new("2\n5 6\n"), InputFormat::PolyLib)
            .unwrap();
        assert_eq!(vec.len(), 2);
    }

    #[test]
    fn test_vector_format_selection() {
        let ctx = Context::default();
        let err = ctx.read_vector_from_str("2\n5 6\n", InputFormat::Isl).unwrap_err();
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnsupportedFormat));
    }

    #[test]
    fn test_multiple_disjuncts_rejected() {
        let ctx = Context::default();
        let err = ctx
            .read_basic_map_from_str("2\n1 3\n1 1 0\n1 3\n1 -1 5\n", None)
            .unwrap_err();
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::MultipleDisjuncts));
    }

    #[test]
    fn test_strict_context() {
        let ctx = Context::new(ReadConfig::default().with_reject_trailing_input(true));
        assert!(ctx.read_map_from_str("{[i]}", None).is_ok());
        let err = ctx.read_map_from_str("{[i]} {[j]}", None).unwrap_err();
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::UnexpectedToken));
    }
}
