use super::scanner::{Token, TokenKind};

#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    Program(Vec<Node>),
    Block(Vec<Node>),
    Literal { kind: TokenKind, value: String },
}

// Wraps every token before the end of input in a literal, all inside a
// single block.
pub fn parse(tokens: &[Token]) -> Node {
    let statements = tokens.iter()
        .take_while(|token| token.kind != TokenKind::Eof)
        .map(|token| Node::Literal { kind: token.kind, value: token.value.clone() })
        .collect();

    Node::Program(vec![Node::Block(statements)])
}

pub fn print(node: &Node) -> String {
    let mut out = String::new();
    print_node(node, 0, &mut out);
    out
}

fn print_node(node: &Node, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));

    match node {
        Node::Program(children) | Node::Block(children) => {
            out.push_str(if matches!(node, Node::Program(_)) { "Program:\n" } else { "Block:\n" });
            for child in children {
                print_node(child, depth + 1, out);
            }
        }
        Node::Literal { kind, value } => out.push_str(&format!("Literal: {} => '{}'\n", kind, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::scanner::Scanner;

    #[test]
    fn parse_wraps_literals() {
        let tokens = Scanner::new(['a', 'b']).tokenize("ab").unwrap();

        assert_eq!(parse(&tokens), Node::Program(vec![Node::Block(vec![
            Node::Literal { kind: TokenKind::Terminal('a'), value: "a".to_string() },
            Node::Literal { kind: TokenKind::Terminal('b'), value: "b".to_string() },
        ])]));
    }

    #[test]
    fn print_tree() {
        let tokens = Scanner::new(['d', 'a']).tokenize("da").unwrap();

        assert_eq!(
            print(&parse(&tokens)),
            "Program:\n  Block:\n    Literal: Terminal(d) => 'd'\n    Literal: Terminal(a) => 'a'\n"
        );
    }

    #[test]
    fn print_empty_program() {
        assert_eq!(print(&parse(&[])), "Program:\n  Block:\n");
        assert_eq!(print(&Node::Program(Vec::new())), "Program:\n");
    }
}
