//! ### [7.4 Operations on Iterator Objects](https://tc39.es/ecma262/#sec-operations-on-iterator-objects)

use crate::{
    ecmascript::{
        abstract_operations::{
            operations_on_objects::{
                call, call_function, create_data_property_or_throw, get, get_method,
            },
            type_conversion::to_boolean,
        },
        builtins::ordinary::ordinary_object_create_with_intrinsics,
        execution::{
            agent::{Agent, ExceptionType, JsError, JsResult},
            realm::ProtoIntrinsics,
        },
        types::{
            language::{
                function::Function,
                object::{property_key::PropertyKey, IntoObject, Object, OrdinaryObject},
                value::{IntoValue, Value},
            },
        },
    },
    heap::WellKnownSymbolIndexes,
};

/// ### [7.4.1 Iterator Records](https://tc39.es/ecma262/#sec-iterator-records)
///
/// An Iterator Record is a Record value used to encapsulate an Iterator or
/// AsyncIterator along with the next method.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IteratorRecord {
    /// ### \[\[Iterator\]\]
    pub(crate) iterator: Object,
    /// ### \[\[NextMethod\]\]
    pub(crate) next_method: Value,
    /// ### \[\[Done\]\]
    pub(crate) done: bool,
}

/// ### [7.4.3 GetIteratorFromMethod ( obj, method )](https://tc39.es/ecma262/#sec-getiteratorfrommethod)
pub(crate) fn get_iterator_from_method(
    agent: &mut Agent,
    obj: Value,
    method: Function,
) -> JsResult<IteratorRecord> {
    // 1. Let iterator be ? Call(method, obj).
    let iterator = call_function(agent, method, obj, None)?;

    // 2. If iterator is not an Object, throw a TypeError exception.
    let Ok(iterator) = Object::try_from(iterator) else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Iterator is not an object",
        ));
    };

    // 3. Let nextMethod be ? Get(iterator, "next").
    let next_key = PropertyKey::from_str(agent, "next");
    let next_method = get(agent, iterator, next_key)?;

    // 4. Let iteratorRecord be the Iterator Record { [[Iterator]]: iterator,
    //    [[NextMethod]]: nextMethod, [[Done]]: false }.
    // 5. Return iteratorRecord.
    Ok(IteratorRecord {
        iterator,
        next_method,
        done: false,
    })
}

/// ### [7.4.4 GetIterator ( obj, kind )](https://tc39.es/ecma262/#sec-getiterator)
///
/// Only the SYNC kind belongs to the core; async iteration is out of scope.
pub(crate) fn get_iterator(agent: &mut Agent, obj: Value) -> JsResult<IteratorRecord> {
    // 1.-2. The ASYNC kind is handled by host extensions.
    // 3. Let method be ? GetMethod(obj, %Symbol.iterator%).
    let method = get_method(
        agent,
        obj,
        PropertyKey::from(WellKnownSymbolIndexes::Iterator),
    )?;

    // 4. If method is undefined, throw a TypeError exception.
    let Some(method) = method else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Value is not iterable",
        ));
    };

    // 5. Return ? GetIteratorFromMethod(obj, method).
    get_iterator_from_method(agent, obj, method)
}

/// ### [7.4.6 IteratorNext ( iteratorRecord \[ , value \] )](https://tc39.es/ecma262/#sec-iteratornext)
pub(crate) fn iterator_next(
    agent: &mut Agent,
    iterator_record: &IteratorRecord,
    value: Option<Value>,
) -> JsResult<Object> {
    // 1. If value is not present, then
    //    a. Let result be ? Call(iteratorRecord.[[NextMethod]],
    //       iteratorRecord.[[Iterator]]).
    // 2. Else,
    //    a. Let result be ? Call(iteratorRecord.[[NextMethod]],
    //       iteratorRecord.[[Iterator]], « value »).
    let result = call(
        agent,
        iterator_record.next_method,
        iterator_record.iterator.into_value(),
        value
            .as_ref()
            .map(|value| crate::ecmascript::builtins::builtin_function::ArgumentsList(
                core::slice::from_ref(value),
            )),
    )?;

    // 3. If result is not an Object, throw a TypeError exception.
    Object::try_from(result).map_err(|_| {
        agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Iterator result is not an object",
        )
    })
}

/// ### [7.4.7 IteratorComplete ( iterResult )](https://tc39.es/ecma262/#sec-iteratorcomplete)
pub(crate) fn iterator_complete(agent: &mut Agent, iter_result: Object) -> JsResult<bool> {
    // 1. Return ToBoolean(? Get(iterResult, "done")).
    let done_key = PropertyKey::from_str(agent, "done");
    let done = get(agent, iter_result, done_key)?;
    Ok(to_boolean(agent, done))
}

/// ### [7.4.8 IteratorValue ( iterResult )](https://tc39.es/ecma262/#sec-iteratorvalue)
pub(crate) fn iterator_value(agent: &mut Agent, iter_result: Object) -> JsResult<Value> {
    // 1. Return ? Get(iterResult, "value").
    let value_key = PropertyKey::from_str(agent, "value");
    get(agent, iter_result, value_key)
}

/// ### [7.4.9 IteratorStep ( iteratorRecord )](https://tc39.es/ecma262/#sec-iteratorstep)
///
/// Returns None when the iterator has signalled completion.
pub(crate) fn iterator_step(
    agent: &mut Agent,
    iterator_record: &IteratorRecord,
) -> JsResult<Option<Object>> {
    // 1. Let result be ? IteratorNext(iteratorRecord).
    let result = iterator_next(agent, iterator_record, None)?;

    // 2. Let done be ? IteratorComplete(result).
    let done = iterator_complete(agent, result)?;

    // 3. If done is true, return false.
    if done {
        return Ok(None);
    }

    // 4. Return result.
    Ok(Some(result))
}

/// ### [7.4.10 IteratorStepValue ( iteratorRecord )](https://tc39.es/ecma262/#sec-iteratorstepvalue)
///
/// Returns the next yielded value, or None when the iterator completed. The
/// record's \[\[Done]] field is updated so that a later IteratorClose knows
/// not to call `return`.
pub(crate) fn iterator_step_value(
    agent: &mut Agent,
    iterator_record: &mut IteratorRecord,
) -> JsResult<Option<Value>> {
    // 1. Let result be Completion(IteratorStep(iteratorRecord)).
    let result = iterator_step(agent, iterator_record);
    let result = match result {
        Err(err) => {
            // 2.-3. If result is a throw completion, set
            //    iteratorRecord.[[Done]] to true and return ? result.
            iterator_record.done = true;
            return Err(err);
        }
        Ok(None) => {
            // 4. If result is false, set iteratorRecord.[[Done]] to true
            //    and return DONE.
            iterator_record.done = true;
            return Ok(None);
        }
        Ok(Some(result)) => result,
    };

    // 5. Let value be Completion(IteratorValue(result)).
    let value = iterator_value(agent, result);

    // 6. If value is a throw completion, set iteratorRecord.[[Done]] to
    //    true.
    if value.is_err() {
        iterator_record.done = true;
    }

    // 7. Return ? value.
    value.map(Some)
}

/// ### [7.4.11 IteratorClose ( iteratorRecord, completion )](https://tc39.es/ecma262/#sec-iteratorclose)
///
/// The normal-completion variant: the inner `return` call's errors
/// propagate, and its result must be an object.
pub(crate) fn iterator_close_with_value(
    agent: &mut Agent,
    iterator: Object,
    completion: Value,
) -> JsResult<Value> {
    // 1. Assert: iteratorRecord.[[Iterator]] is an Object.
    // 2. Let iterator be iteratorRecord.[[Iterator]].
    // 3. Let innerResult be Completion(GetMethod(iterator, "return")).
    let return_key = PropertyKey::from_str(agent, "return");
    let return_method = get_method(agent, iterator.into_value(), return_key)?;

    // 4. If innerResult is a normal completion, then
    // a. Let return be innerResult.[[Value]].
    // b. If return is undefined, return ? completion.
    let Some(return_method) = return_method else {
        return Ok(completion);
    };

    // c. Set innerResult to Completion(Call(return, iterator)).
    let inner_result = call_function(agent, return_method, iterator.into_value(), None)?;

    // 5.-6. If completion is a throw completion, return ? completion (the
    //       throw variant is iterator_close_with_error).
    // 7. If innerResult.[[Value]] is not an Object, throw a TypeError
    //    exception.
    if !inner_result.is_object() {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Iterator 'return' method returned a non-object value",
        ));
    }

    // 8. Return ? completion.
    Ok(completion)
}

/// ### [7.4.11 IteratorClose ( iteratorRecord, completion )](https://tc39.es/ecma262/#sec-iteratorclose)
///
/// The throw-completion variant: errors from the `return` call are
/// discarded, the incoming throw wins.
pub(crate) fn iterator_close_with_error(
    agent: &mut Agent,
    iterator: Object,
    completion: JsError,
) -> JsError {
    // 3. Let innerResult be Completion(GetMethod(iterator, "return")).
    let return_key = PropertyKey::from_str(agent, "return");
    let Ok(return_method) = get_method(agent, iterator.into_value(), return_key) else {
        // 6. If completion is a throw completion, return ? completion.
        return completion;
    };

    // b. If return is undefined, return ? completion.
    let Some(return_method) = return_method else {
        return completion;
    };

    // c. Set innerResult to Completion(Call(return, iterator)).
    let _ = call_function(agent, return_method, iterator.into_value(), None);

    // 5. If completion is a throw completion, return ? completion.
    completion
}

/// ### [7.4.12 CreateIteratorResultObject ( value, done )](https://tc39.es/ecma262/#sec-createiterresultobject)
pub(crate) fn create_iter_result_object(
    agent: &mut Agent,
    value: Value,
    done: bool,
) -> OrdinaryObject {
    // 1. Let obj be OrdinaryObjectCreate(%Object.prototype%).
    let obj = ordinary_object_create_with_intrinsics(agent, Some(ProtoIntrinsics::Object));
    // 2. Perform ! CreateDataPropertyOrThrow(obj, "value", value).
    let value_key = PropertyKey::from_str(agent, "value");
    create_data_property_or_throw(agent, obj, value_key, value).unwrap();
    // 3. Perform ! CreateDataPropertyOrThrow(obj, "done", done).
    let done_key = PropertyKey::from_str(agent, "done");
    create_data_property_or_throw(agent, obj, done_key, done.into()).unwrap();
    // 4. Return obj.
    obj
}

/// ### [7.4.14 IteratorToList ( iteratorRecord )](https://tc39.es/ecma262/#sec-iteratortolist)
pub(crate) fn iterator_to_list(
    agent: &mut Agent,
    iterator_record: &mut IteratorRecord,
) -> JsResult<Vec<Value>> {
    // 1. Let values be a new empty List.
    let mut values = Vec::new();
    // 2. Repeat: let next be ? IteratorStepValue(iteratorRecord); if next
    //    is not DONE, append next to values.
    while let Some(next) = iterator_step_value(agent, iterator_record)? {
        values.push(next);
    }
    // 3. Return values.
    Ok(values)
}

