//! Assembles the scanned token stream into the instruction tree.
//!
//! Block structure is validated against an explicit stack of open blocks:
//! a closer must match the innermost opener, branch directives must sit
//! directly inside an `@if`, and every block must be closed by end of input.

use crate::scanner::{ScanResult, TokenKind};
use kiln_types::{
    BlockKind, Branch, BranchDirective, CompileError, CompileErrorKind, Node, Result, Span,
    Template,
};

/// One open block on the stack. `parent` holds the node list the finished
/// block will be appended to.
enum Frame {
    If {
        opened_at: Span,
        parent: Vec<Node>,
        /// Completed `@if`/`@elseif` arms.
        branches: Vec<Branch>,
        /// Condition of the arm currently collecting nodes; `None` once
        /// `@else` has been seen.
        arm_cond: Option<String>,
        else_at: Option<Span>,
    },
    ForEach {
        opened_at: Span,
        parent: Vec<Node>,
        header: String,
    },
}

impl Frame {
    fn kind(&self) -> BlockKind {
        match self {
            Frame::If { .. } => BlockKind::If,
            Frame::ForEach { .. } => BlockKind::ForEach,
        }
    }

    fn opened_at(&self) -> Span {
        match self {
            Frame::If { opened_at, .. } | Frame::ForEach { opened_at, .. } => *opened_at,
        }
    }
}

/// Build a [`Template`] from a scan, validating block structure.
pub(crate) fn build(scan: ScanResult) -> Result<Template> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut current: Vec<Node> = Vec::new();

    for token in scan.tokens {
        match token.kind {
            TokenKind::Text(text) => current.push(Node::Literal(text)),
            TokenKind::Output(expr) => current.push(Node::Output(expr)),
            TokenKind::If(cond) => stack.push(Frame::If {
                opened_at: token.span,
                parent: std::mem::take(&mut current),
                branches: Vec::new(),
                arm_cond: Some(cond),
                else_at: None,
            }),
            TokenKind::ElseIf(cond) => {
                next_arm(
                    &mut stack,
                    &mut current,
                    BranchDirective::ElseIf,
                    Some(cond),
                    token.span,
                )?;
            }
            TokenKind::Else => {
                next_arm(&mut stack, &mut current, BranchDirective::Else, None, token.span)?;
            }
            TokenKind::EndIf => close_block(&mut stack, &mut current, BlockKind::If, token.span)?,
            TokenKind::ForEach(header) => stack.push(Frame::ForEach {
                opened_at: token.span,
                parent: std::mem::take(&mut current),
                header,
            }),
            TokenKind::EndForeach => {
                close_block(&mut stack, &mut current, BlockKind::ForEach, token.span)?;
            }
        }
    }

    if let Some(frame) = stack.last() {
        return Err(CompileError::new(
            CompileErrorKind::UnclosedBlock {
                opened: frame.kind(),
                opened_at: frame.opened_at(),
            },
            scan.eof,
        ));
    }
    Ok(Template::new(current))
}

/// Handle `@elseif`/`@else`: finish the current arm and start the next.
fn next_arm(
    stack: &mut [Frame],
    current: &mut Vec<Node>,
    directive: BranchDirective,
    cond: Option<String>,
    span: Span,
) -> Result<()> {
    match stack.last_mut() {
        Some(Frame::If {
            branches,
            arm_cond,
            else_at,
            ..
        }) => {
            if let Some(at) = else_at {
                return Err(CompileError::new(
                    CompileErrorKind::BranchAfterElse {
                        directive,
                        else_at: *at,
                    },
                    span,
                ));
            }
            let finished = arm_cond.take().expect("open arm has a condition");
            branches.push(Branch {
                cond: finished,
                body: std::mem::take(current),
            });
            match cond {
                Some(c) => *arm_cond = Some(c),
                None => *else_at = Some(span),
            }
            Ok(())
        }
        _ => Err(CompileError::new(
            CompileErrorKind::BranchOutsideIf { directive },
            span,
        )),
    }
}

/// Handle `@endif`/`@endforeach`: the closer must match the innermost block.
fn close_block(
    stack: &mut Vec<Frame>,
    current: &mut Vec<Node>,
    closer: BlockKind,
    span: Span,
) -> Result<()> {
    let Some(frame) = stack.pop() else {
        return Err(CompileError::new(
            CompileErrorKind::UnexpectedClose { closer },
            span,
        ));
    };
    if frame.kind() != closer {
        return Err(CompileError::new(
            CompileErrorKind::MismatchedClose {
                closer,
                opened: frame.kind(),
                opened_at: frame.opened_at(),
            },
            span,
        ));
    }

    match frame {
        Frame::If {
            parent,
            mut branches,
            arm_cond,
            else_at,
            ..
        } => {
            let body = std::mem::take(current);
            let fallback = if else_at.is_some() {
                Some(body)
            } else {
                let cond = arm_cond.expect("open arm has a condition");
                branches.push(Branch { cond, body });
                None
            };
            *current = parent;
            current.push(Node::If { branches, fallback });
        }
        Frame::ForEach { parent, header, .. } => {
            let body = std::mem::take(current);
            *current = parent;
            current.push(Node::ForEach { header, body });
        }
    }
    Ok(())
}
