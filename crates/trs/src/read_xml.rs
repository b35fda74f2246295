#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use log::debug;
use log::info;
use log::warn;
use roxmltree::Document;
use roxmltree::Node;
use roxmltree::ParsingOptions;

use trsconv_utilities::debug_trace;

use crate::Application;
use crate::FunctionSymbol;
use crate::Rule;
use crate::Signature;
use crate::Sort;
use crate::Term;
use crate::Trs;
use crate::TrsError;
use crate::Variable;

/// The largest arity accepted for a function symbol.
pub const MAX_ARITY: usize = u16::MAX as usize;

/// The largest nesting depth of a term, where a variable or constant has depth 1.
///
/// Terms are read and printed recursively, so deeper terms are rejected
/// instead of exhausting the stack of the converting thread.
pub const MAX_TERM_DEPTH: usize = 512;

/// Controls how strictly a document is checked while reading.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReaderOptions {
    /// Rejects duplicate symbol names in the signature, and applications
    /// whose number of arguments differs from the arity of their symbol. Both
    /// are only reported as warnings otherwise.
    pub strict: bool,
}

/// Reads a TRS in the XML format of the termination problem database from
/// the given file, see [read_trs_from_str].
pub fn read_trs(path: &Path, options: ReaderOptions) -> Result<Trs, TrsError> {
    let contents = fs::read_to_string(path).map_err(|e| TrsError::io(path, e))?;
    read_trs_from_str(&contents, options)
}

/// Reads a TRS in the XML format of the termination problem database.
///
/// The `trs` element is either the root element, or a direct child of it
/// (the `problem` element in the database). Its relevant contents are:
///
/// ```text
/// trs
///  └ signature
///     └ funcsym* { name, arity }
///  └ rules
///     └ rule* { lhs: term, rhs: term }
/// term := var{name} | funapp{ name, arg* { term } }
/// ```
///
/// Every other element is ignored. The function symbol of an application is
/// resolved to the first declaration in the signature with the same name.
pub fn read_trs_from_str(contents: &str, options: ReaderOptions) -> Result<Trs, TrsError> {
    let document = Document::parse_with_options(
        contents,
        ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        },
    )
    .map_err(|e| TrsError::MalformedInput(e.to_string()))?;

    let root = document.root_element();
    let trs = if root.has_tag_name("trs") {
        root
    } else {
        child(root, "trs")?
    };

    let signature = read_signature(child(trs, "signature")?, options)?;

    let reader = TermReader {
        signature: &signature,
        options,
    };
    let rules = children(child(trs, "rules")?, "rule")
        .map(|rule| reader.read_rule(rule))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        "Read TRS with {} function symbols and {} rules",
        signature.len(),
        rules.len()
    );
    Ok(Trs::new(signature, rules))
}

/// Reads the function symbol declarations in document order.
fn read_signature(node: Node<'_, '_>, options: ReaderOptions) -> Result<Signature, TrsError> {
    let mut signature = Signature::new();

    for funcsym in children(node, "funcsym") {
        let name = text(child(funcsym, "name")?)?;
        let arity_text = text(child(funcsym, "arity")?)?;
        let arity: usize = arity_text.parse().map_err(|_| {
            TrsError::MalformedInput(format!("invalid arity '{arity_text}' of function symbol '{name}'"))
        })?;

        if arity > MAX_ARITY {
            return Err(TrsError::MalformedInput(format!(
                "arity {arity} of function symbol '{name}' exceeds the maximum of {MAX_ARITY}"
            )));
        }

        debug!("Read function symbol {name}/{arity}");
        signature.push(FunctionSymbol::new(name, arity));
    }

    let duplicates = signature.duplicates().join(", ");
    if !duplicates.is_empty() {
        if options.strict {
            return Err(TrsError::MalformedInput(format!(
                "function symbols declared more than once: {duplicates}"
            )));
        }

        warn!("Function symbols declared more than once: {duplicates}, using their first declaration");
    }

    Ok(signature)
}

/// Reads terms and rules with respect to a fixed signature.
struct TermReader<'a> {
    signature: &'a Signature,
    options: ReaderOptions,
}

impl TermReader<'_> {
    fn read_rule(&self, node: Node<'_, '_>) -> Result<Rule, TrsError> {
        let lhs = self.read_term(first_element(child(node, "lhs")?)?, 1)?;
        let rhs = self.read_term(first_element(child(node, "rhs")?)?, 1)?;

        let rule = Rule { lhs, rhs };
        debug!("Read rule {rule}");
        Ok(rule)
    }

    /// Reads the term at `node`, which occurs at the given depth.
    fn read_term(&self, node: Node<'_, '_>, depth: usize) -> Result<Term, TrsError> {
        if depth > MAX_TERM_DEPTH {
            return Err(TrsError::MalformedInput(format!(
                "term is nested deeper than {MAX_TERM_DEPTH} levels"
            )));
        }

        match node.tag_name().name() {
            "var" => Ok(Variable::new(text(node)?, Sort::A).into()),
            "funapp" => self.read_application(node, depth),
            other => Err(TrsError::MalformedInput(format!(
                "expected <var> or <funapp>, found <{other}>"
            ))),
        }
    }

    fn read_application(&self, node: Node<'_, '_>, depth: usize) -> Result<Term, TrsError> {
        let name = text(child(node, "name")?)?;
        let symbol = self
            .signature
            .find(name)
            .ok_or_else(|| TrsError::UnresolvedSymbol(name.to_string()))?;
        debug_trace!("Resolved {name} to {symbol}");

        let arguments = children(node, "arg")
            .map(|arg| self.read_term(first_element(arg)?, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        if arguments.len() != symbol.arity() {
            let message = format!(
                "function symbol '{name}' of arity {} is applied to {} arguments",
                symbol.arity(),
                arguments.len()
            );

            if self.options.strict {
                return Err(TrsError::MalformedInput(message));
            }
            warn!("{message}");
        }

        Ok(Application::new(symbol.clone(), arguments).into())
    }
}

/// Returns the first child element of `node` with the given tag name.
fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Result<Node<'a, 'input>, TrsError> {
    node.children().find(|n| n.has_tag_name(name)).ok_or_else(|| {
        TrsError::MalformedInput(format!(
            "<{}> has no <{name}> element",
            node.tag_name().name()
        ))
    })
}

/// Returns the child elements of `node` with the given tag name, in document order.
fn children<'a, 'input>(node: Node<'a, 'input>, name: &str) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |n| n.has_tag_name(name))
}

/// Returns the first child element of `node`, which is the term of `lhs`, `rhs` and `arg`.
fn first_element<'a, 'input>(node: Node<'a, 'input>) -> Result<Node<'a, 'input>, TrsError> {
    node.first_element_child().ok_or_else(|| {
        TrsError::MalformedInput(format!("<{}> does not contain a term", node.tag_name().name()))
    })
}

/// Returns the text of an element without surrounding whitespace, which must be non-empty.
fn text<'a>(node: Node<'a, '_>) -> Result<&'a str, TrsError> {
    node.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| TrsError::MalformedInput(format!("<{}> has no text", node.tag_name().name())))
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use test_log::test;

    use super::*;

    const NAT: &str = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <problem type="termination">
          <trs>
            <rules>
              <rule>
                <lhs><funapp><name>add</name><arg><var>x</var></arg><arg><funapp><name>0</name></funapp></arg></funapp></lhs>
                <rhs><var>x</var></rhs>
              </rule>
            </rules>
            <signature>
              <funcsym><name>0</name><arity>0</arity></funcsym>
              <funcsym><name>add</name><arity>2</arity></funcsym>
            </signature>
          </trs>
          <strategy>FULL</strategy>
        </problem>
    "#};

    #[test]
    fn test_read_problem() {
        let trs = read_trs_from_str(NAT, ReaderOptions::default()).unwrap();

        let names: Vec<&str> = trs.signature().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["0", "add"]);
        assert_eq!(trs.signature().find("add").unwrap().arity(), 2);

        assert_eq!(trs.rules().len(), 1);
        assert_eq!(trs.rules()[0].to_string(), "add(x, 0) -> x");
    }

    #[test]
    fn test_read_trs_root() {
        let xml = "<trs><signature><funcsym><name>c</name><arity>0</arity></funcsym></signature><rules/></trs>";

        let trs = read_trs_from_str(xml, ReaderOptions::default()).unwrap();
        assert_eq!(trs.signature().len(), 1);
        assert!(trs.rules().is_empty());
    }

    #[test]
    fn test_text_is_trimmed() {
        let xml = indoc! {"
            <trs>
              <signature>
                <funcsym>
                  <name> f </name>
                  <arity>
                    1
                  </arity>
                </funcsym>
              </signature>
              <rules/>
            </trs>
        "};

        let trs = read_trs_from_str(xml, ReaderOptions::default()).unwrap();
        assert_eq!(trs.signature().find("f").unwrap().arity(), 1);
    }

    #[test]
    fn test_missing_sections() {
        let result = read_trs_from_str("<trs><rules/></trs>", ReaderOptions::default());
        assert!(matches!(result, Err(TrsError::MalformedInput(_))));

        let result = read_trs_from_str("<problem/>", ReaderOptions::default());
        assert!(matches!(result, Err(TrsError::MalformedInput(_))));
    }

    #[test]
    fn test_invalid_xml() {
        let result = read_trs_from_str("<trs><signature></trs>", ReaderOptions::default());
        assert!(matches!(result, Err(TrsError::MalformedInput(_))));
    }

    /// Returns a document with the rule `s(...s(x)...) -> x` where the left-hand side has the given depth.
    fn nested_document(depth: usize) -> String {
        let term = format!(
            "{}<var>x</var>{}",
            "<funapp><name>s</name><arg>".repeat(depth - 1),
            "</arg></funapp>".repeat(depth - 1)
        );

        format!(
            "<trs><signature><funcsym><name>s</name><arity>1</arity></funcsym></signature>\
             <rules><rule><lhs>{term}</lhs><rhs><var>x</var></rhs></rule></rules></trs>"
        )
    }

    #[test]
    fn test_maximum_depth() {
        let trs = read_trs_from_str(&nested_document(MAX_TERM_DEPTH), ReaderOptions::default()).unwrap();

        let printed = trs.rules()[0].to_string();
        assert_eq!(printed.matches("s(").count(), MAX_TERM_DEPTH - 1);
    }

    #[test]
    fn test_too_deep() {
        match read_trs_from_str(&nested_document(MAX_TERM_DEPTH + 1), ReaderOptions::default()) {
            Err(TrsError::MalformedInput(message)) => assert!(message.contains("nested")),
            other => panic!("Expected a malformed input error, got {other:?}"),
        }

        let result = read_trs_from_str(&nested_document(10_000), ReaderOptions::default());
        assert!(matches!(result, Err(TrsError::MalformedInput(_))));
    }

    #[test]
    fn test_arity_out_of_range() {
        for arity in ["18446744073709551615", "18446744073709551616", "65536", "-1"] {
            let xml = format!(
                "<trs><signature><funcsym><name>f</name><arity>{arity}</arity></funcsym></signature><rules/></trs>"
            );

            let result = read_trs_from_str(&xml, ReaderOptions::default());
            assert!(matches!(result, Err(TrsError::MalformedInput(_))), "arity {arity}");
        }

        let xml = format!(
            "<trs><signature><funcsym><name>f</name><arity>{MAX_ARITY}</arity></funcsym></signature><rules/></trs>"
        );
        let trs = read_trs_from_str(&xml, ReaderOptions::default()).unwrap();
        assert_eq!(trs.signature().find("f").unwrap().arity(), MAX_ARITY);
    }

    #[test]
    fn test_arity_mismatch() {
        let xml = indoc! {"
            <trs>
              <signature><funcsym><name>s</name><arity>1</arity></funcsym></signature>
              <rules>
                <rule>
                  <lhs><funapp><name>s</name><arg><var>x</var></arg><arg><var>y</var></arg></funapp></lhs>
                  <rhs><var>x</var></rhs>
                </rule>
              </rules>
            </trs>
        "};

        let trs = read_trs_from_str(xml, ReaderOptions::default()).unwrap();
        assert_eq!(trs.rules()[0].to_string(), "s(x, y) -> x");

        let result = read_trs_from_str(xml, ReaderOptions { strict: true });
        assert!(matches!(result, Err(TrsError::MalformedInput(_))));
    }

    #[test]
    fn test_duplicate_symbols() {
        let xml = indoc! {"
            <trs>
              <signature>
                <funcsym><name>f</name><arity>1</arity></funcsym>
                <funcsym><name>f</name><arity>0</arity></funcsym>
              </signature>
              <rules>
                <rule>
                  <lhs><funapp><name>f</name><arg><var>x</var></arg></funapp></lhs>
                  <rhs><var>x</var></rhs>
                </rule>
              </rules>
            </trs>
        "};

        let trs = read_trs_from_str(xml, ReaderOptions::default()).unwrap();
        assert_eq!(trs.signature().len(), 2);
        assert_eq!(trs.rules()[0].to_string(), "f(x) -> x");

        match read_trs_from_str(xml, ReaderOptions { strict: true }) {
            Err(TrsError::MalformedInput(message)) => assert!(message.contains('f')),
            other => panic!("Expected a malformed input error, got {other:?}"),
        }
    }
}
