use super::*;
use crate::{validator, IrError, ValueKind};

#[test]
fn empty_functions() {
    let mut ctx = Context::new();
    let function = ctx.create_function("main");

    assert!(ctx[function].is_empty());
    assert_eq!(None, ctx.entry_block(function));
    assert_eq!("main", ctx[function].name());

    let entry = ctx.create_block();
    let other = ctx.create_block();
    ctx.append_block(function, entry);
    ctx.append_block(function, other);

    assert_eq!(Some(entry), ctx.entry_block(function));
    assert_eq!(&[entry, other], ctx[function].blocks());
    assert_eq!(Some(function), ctx.block_function(other));
}

#[test]
#[should_panic(expected = "attempt to append block that already belongs to a function")]
fn blocks_belong_to_one_function() {
    let mut ctx = Context::new();
    let main = ctx.create_function("main");
    let other = ctx.create_function("other");
    let block = ctx.create_block();

    ctx.append_block(main, block);
    ctx.append_block(other, block);
}

#[test]
#[should_panic(expected = "attempt to append operation that already belongs to a block")]
fn operations_belong_to_one_block() {
    let mut ctx = Context::new();
    let first = ctx.create_block();
    let second = ctx.create_block();
    let op = ctx.create_op("nop", &[], 0, Location::Unknown);

    ctx.append_op(first, op);
    ctx.append_op(second, op);
}

#[test]
fn detaching_the_entry_block_promotes_the_next_one() {
    let mut ctx = Context::new();
    let function = ctx.create_function("main");
    let entry = ctx.create_block();
    let other = ctx.create_block();
    ctx.append_block(function, entry);
    ctx.append_block(function, other);
    let argument = ctx.add_argument(other);

    assert!(!ctx.is_function_argument(argument));
    ctx.detach_block(entry);
    assert!(ctx.is_function_argument(argument));
    assert_eq!(None, ctx.block_function(entry));
}

#[test]
fn detach_argument_renumbers_the_rest() {
    let mut ctx = Context::new();
    let block = ctx.create_block();
    let arguments: Vec<_> = (0..3).map(|_| ctx.add_argument(block)).collect();

    let detached = ctx.detach_argument(block, 1);

    assert_eq!(arguments[1], detached);
    assert_eq!(&[arguments[0], arguments[2]], ctx[block].arguments());
    assert_eq!(
        ValueKind::BlockArgument {
            owner: Some(block),
            index: 0
        },
        ctx[arguments[0]].kind()
    );
    assert_eq!(
        ValueKind::BlockArgument {
            owner: Some(block),
            index: 1
        },
        ctx[arguments[2]].kind()
    );
}

#[test]
#[should_panic(expected = "attempt to detach nonexistent block argument #0")]
fn detach_nonexistent_argument_panics() {
    let mut ctx = Context::new();
    let block = ctx.create_block();

    ctx.detach_argument(block, 0);
}

#[test]
fn erase_op_refuses_used_results() {
    let mut ctx = Context::new();
    let block = ctx.create_block();
    let def = ctx.create_op("const", &[], 1, Location::Unknown);
    let user = ctx.create_op("neg", &[ctx.result(def, 0)], 1, Location::Unknown);
    ctx.append_op(block, def);
    ctx.append_op(block, user);

    assert_eq!(
        Err(IrError::ResultStillUsed {
            name: "const".to_owned(),
            index: 0,
            uses: 1,
        }),
        ctx.erase_op(def)
    );
    assert!(ctx.get_op(def).is_some());

    assert_eq!(Ok(()), ctx.erase_op(user));
    assert!(ctx.use_empty(ctx.result(def, 0)));
    assert_eq!(&[def], ctx[block].operations());

    let result = ctx.result(def, 0);
    assert_eq!(Ok(()), ctx.erase_op(def));
    assert!(ctx.get_op(def).is_none());
    assert!(ctx.get_value(result).is_none());
    assert!(ctx[block].operations().is_empty());
    assert_eq!(Ok(()), validator::validate_operands(&ctx));
}

#[test]
fn erase_block_drops_internal_uses() {
    let mut ctx = Context::with_settings(Settings {
        verify_use_lists: true,
    });
    let function = ctx.create_function("main");
    let entry = ctx.create_block();
    let exit = ctx.create_block();
    ctx.append_block(function, entry);
    ctx.append_block(function, exit);
    let outer = ctx.create_op("const", &[], 1, Location::Unknown);
    ctx.append_op(entry, outer);

    let argument = ctx.add_argument(exit);
    let add = ctx.create_op(
        "add",
        &[argument, ctx.result(outer, 0)],
        1,
        Location::Unknown,
    );
    let ret = ctx.create_op("ret", &[ctx.result(add, 0)], 0, Location::Unknown);
    ctx.append_op(exit, add);
    ctx.append_op(exit, ret);

    assert_eq!(Ok(()), ctx.erase_block(exit));

    assert!(ctx.get_block(exit).is_none());
    assert!(ctx.get_op(add).is_none());
    assert!(ctx.get_op(ret).is_none());
    assert!(ctx.get_value(argument).is_none());
    assert!(ctx.use_empty(ctx.result(outer, 0)));
    assert_eq!(&[entry], ctx[function].blocks());
    assert_eq!(Ok(()), validator::validate_operands(&ctx));
}

#[test]
fn erase_block_refuses_outside_uses() {
    let mut ctx = Context::new();
    let function = ctx.create_function("main");
    let entry = ctx.create_block();
    let exit = ctx.create_block();
    ctx.append_block(function, entry);
    ctx.append_block(function, exit);
    let def = ctx.create_op("const", &[], 1, Location::Unknown);
    ctx.append_op(entry, def);
    let user = ctx.create_op("ret", &[ctx.result(def, 0)], 0, Location::Unknown);
    ctx.append_op(exit, user);

    assert_eq!(
        Err(IrError::UsedOutsideBlock {
            value: ctx.result(def, 0),
            user,
        }),
        ctx.erase_block(entry)
    );
    assert_eq!(&[entry, exit], ctx[function].blocks());
    assert!(ctx.has_one_use(ctx.result(def, 0)));
}

#[test]
fn stale_handles_are_rejected() {
    let mut ctx = Context::new();
    let op = ctx.create_op("nop", &[], 0, Location::Unknown);
    ctx.erase_op(op).unwrap();

    // A new operation may reuse the slot, but never the handle.
    let new_op = ctx.create_op("nop", &[], 0, Location::Unknown);
    assert_ne!(op, new_op);
    assert!(ctx.get_op(op).is_none());
    assert!(ctx.get_op(new_op).is_some());
}
