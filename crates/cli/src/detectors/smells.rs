// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-method smell rules for JUnit tests.

use std::sync::LazyLock;

use regex::Regex;

use super::java::{Call, TestMethod, Token};

/// Assertion and verification calls, optionally qualified.
#[allow(clippy::expect_used)]
static ASSERTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\w+\.)*(?:assert\w*|fail|verify\w*)$").expect("valid regex")
});

/// Console output.
#[allow(clippy::expect_used)]
static PRINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^System\.(?:out|err)\.(?:print|println|printf|format|write)$")
        .expect("valid regex")
});

/// `Thread.sleep`, `TimeUnit.SECONDS.sleep` and friends.
#[allow(clippy::expect_used)]
static SLEEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\w+\.)+sleep$").expect("valid regex"));

/// A test smell evaluated one test method at a time.
pub trait Smell: Send + Sync {
    /// Report column name.
    fn name(&self) -> &'static str;

    fn is_smelly(&self, method: &TestMethod) -> bool;
}

/// Every rule, in report column order.
pub fn catalog() -> Vec<Box<dyn Smell>> {
    vec![
        Box::new(AssertionRoulette),
        Box::new(ConditionalTestLogic),
        Box::new(EmptyTest),
        Box::new(ExceptionCatchingThrowing),
        Box::new(IgnoredTest),
        Box::new(MagicNumberTest),
        Box::new(RedundantPrint),
        Box::new(SleepyTest),
        Box::new(UnknownTest),
    ]
}

fn is_assertion(call: &Call<'_>) -> bool {
    ASSERTION.is_match(&call.callee)
}

/// Argument count of an assertion when no message is passed.
///
/// `None` for assertions without a message overload.
fn arity_without_message(method: &str) -> Option<usize> {
    match method {
        "fail" => Some(0),
        "assertTrue" | "assertFalse" | "assertNull" | "assertNotNull" => Some(1),
        "assertEquals" | "assertNotEquals" | "assertSame" | "assertNotSame"
        | "assertArrayEquals" | "assertThat" => Some(2),
        _ => None,
    }
}

/// More than one assertion without an explanatory message.
pub struct AssertionRoulette;

impl Smell for AssertionRoulette {
    fn name(&self) -> &'static str {
        "Assertion Roulette"
    }

    fn is_smelly(&self, method: &TestMethod) -> bool {
        let unexplained = method
            .calls()
            .iter()
            .filter(|call| is_assertion(call))
            .filter(|call| {
                arity_without_message(call.method()).is_some_and(|arity| call.args.len() <= arity)
            })
            .count();
        unexplained > 1
    }
}

/// Branching or looping inside a test.
pub struct ConditionalTestLogic;

impl Smell for ConditionalTestLogic {
    fn name(&self) -> &'static str {
        "Conditional Test Logic"
    }

    fn is_smelly(&self, method: &TestMethod) -> bool {
        let body = &method.body;
        body.iter().enumerate().any(|(i, token)| match token {
            Token::Ident(word) => matches!(word.as_str(), "if" | "switch" | "for" | "while"),
            // `?` in `List<?>` or `<? extends T>` is a wildcard, not a ternary.
            Token::Punct('?') => !body.get(i + 1).is_some_and(|next| {
                next.is_punct('>')
                    || next.is_punct(',')
                    || next.is_ident("extends")
                    || next.is_ident("super")
            }),
            _ => false,
        })
    }
}

/// A test with no statements.
pub struct EmptyTest;

impl Smell for EmptyTest {
    fn name(&self) -> &'static str {
        "Empty Test"
    }

    fn is_smelly(&self, method: &TestMethod) -> bool {
        method.body.is_empty()
    }
}

/// Exceptions handled or declared by the test itself.
pub struct ExceptionCatchingThrowing;

impl Smell for ExceptionCatchingThrowing {
    fn name(&self) -> &'static str {
        "Exception Catching Throwing"
    }

    fn is_smelly(&self, method: &TestMethod) -> bool {
        method.throws
            || method
                .body
                .iter()
                .any(|t| t.is_ident("throw") || t.is_ident("catch"))
    }
}

/// Disabled tests.
pub struct IgnoredTest;

impl Smell for IgnoredTest {
    fn name(&self) -> &'static str {
        "IgnoredTest"
    }

    fn is_smelly(&self, method: &TestMethod) -> bool {
        method.has_annotation("Ignore") || method.has_annotation("Disabled")
    }
}

/// Numeric literals passed straight to an assertion.
pub struct MagicNumberTest;

impl Smell for MagicNumberTest {
    fn name(&self) -> &'static str {
        "Magic Number Test"
    }

    fn is_smelly(&self, method: &TestMethod) -> bool {
        method.calls().iter().filter(|call| is_assertion(call)).any(|call| {
            call.args
                .iter()
                .any(|arg| arg.iter().any(|t| matches!(t, Token::Number(_))))
        })
    }
}

/// Printing to the console from a test.
pub struct RedundantPrint;

impl Smell for RedundantPrint {
    fn name(&self) -> &'static str {
        "Redundant Print"
    }

    fn is_smelly(&self, method: &TestMethod) -> bool {
        method.calls().iter().any(|call| PRINT.is_match(&call.callee))
    }
}

/// Sleeping inside a test.
pub struct SleepyTest;

impl Smell for SleepyTest {
    fn name(&self) -> &'static str {
        "Sleepy Test"
    }

    fn is_smelly(&self, method: &TestMethod) -> bool {
        method.calls().iter().any(|call| SLEEP.is_match(&call.callee))
    }
}

/// A test that asserts nothing and expects no exception.
pub struct UnknownTest;

impl Smell for UnknownTest {
    fn name(&self) -> &'static str {
        "Unknown Test"
    }

    fn is_smelly(&self, method: &TestMethod) -> bool {
        let expects_exception = method
            .annotations
            .iter()
            .any(|a| a.name == "Test" && a.has_arg("expected"));
        !expects_exception && !method.calls().iter().any(is_assertion)
    }
}

#[cfg(test)]
#[path = "smells_tests.rs"]
mod tests;
