//! Property-based tests for the code generator and encoder.
//!
//! Random straight-line programs (nested blocks, declarations and `i32`
//! arithmetic over visible bindings) must always generate, validate and
//! encode. On top of that:
//! 1. Output bytes are a pure function of the program
//! 2. Slots are unique and contiguous from 0
//! 3. Every body keeps the operand stack balanced and the module passes
//!    `wasmparser` validation

mod common;

use bumpalo::Bump;
use common::{assert_valid, code_bodies};
use dlang::ast::{AstBuilder, BinaryOp, Expr, Module, Stmt};
use dlang::{CodegenOptions, Instruction, Pipeline};
use proptest::prelude::*;

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

#[derive(Debug, Clone)]
enum ExprSpec {
    Int(i32),
    /// Index into the visible bindings, wrapped.
    Var(usize),
    Binary(BinaryOp, Box<ExprSpec>, Box<ExprSpec>),
}

#[derive(Debug, Clone)]
enum StmtSpec {
    Let(ExprSpec),
    Expr(ExprSpec),
    Block(Vec<StmtSpec>),
}

#[derive(Debug, Clone)]
struct FunctionSpec {
    params: usize,
    body: Vec<StmtSpec>,
}

fn arithmetic_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Sub),
        Just(BinaryOp::Mul),
        Just(BinaryOp::Div),
    ]
}

fn expr_spec() -> impl Strategy<Value = ExprSpec> {
    let leaf = prop_oneof![
        any::<i32>().prop_map(ExprSpec::Int),
        (0usize..8).prop_map(ExprSpec::Var),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        (arithmetic_op(), inner.clone(), inner)
            .prop_map(|(op, l, r)| ExprSpec::Binary(op, Box::new(l), Box::new(r)))
    })
}

fn stmt_spec() -> impl Strategy<Value = StmtSpec> {
    let leaf = prop_oneof![
        expr_spec().prop_map(StmtSpec::Let),
        expr_spec().prop_map(StmtSpec::Expr),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(StmtSpec::Block)
    })
}

fn function_spec() -> impl Strategy<Value = FunctionSpec> {
    (0usize..3, prop::collection::vec(stmt_spec(), 0..6))
        .prop_map(|(params, body)| FunctionSpec { params, body })
}

fn program() -> impl Strategy<Value = Vec<FunctionSpec>> {
    prop::collection::vec(function_spec(), 1..4)
}

// =============================================================================
// AST LOWERING
// =============================================================================

/// Builds an AST from specs, keeping every reference bound.
struct Lowering<'a, 'ast> {
    b: &'a AstBuilder<'ast>,
    visible: Vec<String>,
    next: usize,
    lets: usize,
}

impl<'a, 'ast> Lowering<'a, 'ast> {
    fn expr(&mut self, spec: &ExprSpec) -> &'ast Expr<'ast> {
        match spec {
            ExprSpec::Int(v) => self.b.int(i64::from(*v)),
            ExprSpec::Var(k) if self.visible.is_empty() => self.b.int(*k as i64),
            ExprSpec::Var(k) => {
                let name = self.visible[k % self.visible.len()].clone();
                self.b.path(&name)
            }
            ExprSpec::Binary(op, l, r) => {
                let l = self.expr(l);
                let r = self.expr(r);
                self.b.binary(l, *op, r)
            }
        }
    }

    fn stmt(&mut self, spec: &StmtSpec) -> Stmt<'ast> {
        match spec {
            StmtSpec::Let(init) => {
                let init = self.expr(init);
                let name = format!("v{}", self.next);
                self.next += 1;
                self.lets += 1;
                let stmt = self.b.let_stmt(&name, init);
                self.visible.push(name);
                stmt
            }
            StmtSpec::Expr(e) => {
                let e = self.expr(e);
                self.b.expr_stmt(e)
            }
            StmtSpec::Block(stmts) => {
                let mark = self.visible.len();
                let lowered: Vec<_> = stmts.iter().map(|s| self.stmt(s)).collect();
                self.visible.truncate(mark);
                self.b.expr_stmt(self.b.block_expr(&lowered))
            }
        }
    }
}

/// Lower a program, returning the module and the declaration count per function.
fn lower<'ast>(b: &AstBuilder<'ast>, specs: &[FunctionSpec]) -> (Module<'ast>, Vec<usize>) {
    let mut items = Vec::new();
    let mut lets = Vec::new();

    for (i, spec) in specs.iter().enumerate() {
        let params: Vec<String> = (0..spec.params).map(|p| format!("p{p}")).collect();
        let mut lowering = Lowering {
            b,
            visible: params.clone(),
            next: 0,
            lets: 0,
        };
        let body: Vec<_> = spec.body.iter().map(|s| lowering.stmt(s)).collect();
        let param_refs: Vec<&str> = params.iter().map(String::as_str).collect();
        items.push(b.function(&format!("f{i}"), &param_refs, b.block(&body)));
        lets.push(lowering.lets);
    }

    (b.module(&items), lets)
}

fn collect_slots(code: &[Instruction], gets: &mut Vec<u32>, sets: &mut Vec<u32>) {
    for inst in code {
        match inst {
            Instruction::LocalGet(slot) => gets.push(*slot),
            Instruction::LocalSet(slot) => sets.push(*slot),
            Instruction::Block { body, .. } => collect_slots(body, gets, sets),
            _ => {}
        }
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Two independently built copies of a program encode to the same bytes.
    #[test]
    fn output_is_deterministic(specs in program()) {
        let pipeline = Pipeline::new()
            .with_options(CodegenOptions::default().with_name_section(true));

        let first_arena = Bump::new();
        let first_builder = AstBuilder::new(&first_arena);
        let (first, _) = lower(&first_builder, &specs);

        let second_arena = Bump::new();
        let second_builder = AstBuilder::new(&second_arena);
        let (second, _) = lower(&second_builder, &specs);

        let a = pipeline.run(&first).unwrap();
        let b = pipeline.run(&second).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Each declaration gets its own slot, numbered after the parameters.
    #[test]
    fn slots_are_unique_and_contiguous(specs in program()) {
        let arena = Bump::new();
        let builder = AstBuilder::new(&arena);
        let (module, lets) = lower(&builder, &specs);

        let ir = Pipeline::new().generate_ir(&module).unwrap();
        for ((func, spec), declared) in ir.functions.iter().zip(&specs).zip(lets) {
            prop_assert_eq!(func.param_count as usize, spec.params);
            prop_assert_eq!(func.locals.len(), spec.params + declared);

            let mut gets = Vec::new();
            let mut sets = Vec::new();
            collect_slots(&func.body, &mut gets, &mut sets);

            let mut sorted = sets.clone();
            sorted.sort_unstable();
            let expected: Vec<u32> = (spec.params as u32..func.local_count()).collect();
            prop_assert_eq!(sorted, expected);
            prop_assert!(gets.iter().all(|&slot| slot < func.local_count()));
        }
    }

    /// Generated bodies validate here and in `wasmparser`, and the encoded
    /// local groups skip parameters.
    #[test]
    fn bodies_keep_the_stack_balanced(specs in program()) {
        let arena = Bump::new();
        let builder = AstBuilder::new(&arena);
        let (module, lets) = lower(&builder, &specs);

        let assembled = Pipeline::new().assemble(&module).unwrap();
        prop_assert_eq!(assembled.report.functions.len(), specs.len());
        for (stats, func) in assembled.report.functions.iter().zip(&assembled.ir.functions) {
            let expected: usize = func.body.iter().map(Instruction::deep_len).sum();
            prop_assert_eq!(stats.instruction_count, expected);
        }

        assert_valid(&assembled.bytes);
        for (body, declared) in code_bodies(&assembled.bytes).into_iter().zip(lets) {
            // Every local is i32, so there is at most one group.
            if declared == 0 {
                prop_assert_eq!(body[0], 0x00);
            } else {
                prop_assert_eq!(body[0], 0x01);
            }
            prop_assert_eq!(body.last().copied(), Some(0x0B));
        }
    }
}

#[cfg(feature = "parallel")]
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Parallel generation commits functions in declaration order.
    #[test]
    fn parallel_matches_sequential(specs in program()) {
        let arena = Bump::new();
        let builder = AstBuilder::new(&arena);
        let (module, _) = lower(&builder, &specs);

        let sequential = Pipeline::new().run(&module).unwrap();
        let parallel = Pipeline::new()
            .with_options(CodegenOptions::default().with_parallel(true))
            .run(&module)
            .unwrap();
        prop_assert_eq!(sequential, parallel);
    }
}
