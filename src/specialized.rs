//! Wrapper aliases for each primitive type.
//!
//! For a primitive named `X` this module exports `XUnaryOperator`,
//! `XBinaryOperator`, `XFunction<R>`, `ToXFunction<T>`, `ToXBiFunction<A, B>`,
//! `XPredicate`, `XBiPredicate`, `XConsumer`, `XSupplier`, and the throwing
//! forms `ThrowingXUnaryOperator<E>`, `ThrowingXBinaryOperator<E>`,
//! `ThrowingXFunction<R, E>`, `ThrowingToXFunction<T, E>`,
//! `ThrowingXPredicate<E>` and `ThrowingXSupplier<E>`.
//!
//! Conversions between two primitives are plain `Function<P, Q>`.

use crate::bifunction::{BiFunction, BinaryOperator};
use crate::consumer::Consumer;
use crate::function::{Function, UnaryOperator};
use crate::predicate::{BiPredicate, Predicate};
use crate::supplier::{Supplier, ThrowingSupplier};
use crate::throwing::{
    ThrowingBinaryOperator, ThrowingFunction, ThrowingPredicate, ThrowingUnaryOperator,
};

macro_rules! specialize {
    ($(
        $p:ty => {
            $unary:ident, $binary:ident, $function:ident, $to:ident, $to_bi:ident,
            $predicate:ident, $bi_predicate:ident, $consumer:ident, $supplier:ident,
            $t_unary:ident, $t_binary:ident, $t_function:ident, $t_to:ident,
            $t_predicate:ident, $t_supplier:ident $(,)?
        }
    )*) => {
        $(
            pub type $unary = UnaryOperator<$p>;
            pub type $binary = BinaryOperator<$p>;
            pub type $function<R> = Function<$p, R>;
            pub type $to<T> = Function<T, $p>;
            pub type $to_bi<A, B> = BiFunction<A, B, $p>;
            pub type $predicate = Predicate<$p>;
            pub type $bi_predicate = BiPredicate<$p, $p>;
            pub type $consumer = Consumer<$p>;
            pub type $supplier = Supplier<$p>;
            pub type $t_unary<E> = ThrowingUnaryOperator<$p, E>;
            pub type $t_binary<E> = ThrowingBinaryOperator<$p, E>;
            pub type $t_function<R, E> = ThrowingFunction<$p, R, E>;
            pub type $t_to<T, E> = ThrowingFunction<T, $p, E>;
            pub type $t_predicate<E> = ThrowingPredicate<$p, E>;
            pub type $t_supplier<E> = ThrowingSupplier<$p, E>;
        )*
    };
}

specialize! {
    bool => {
        BooleanUnaryOperator, BooleanBinaryOperator, BooleanFunction, ToBooleanFunction,
        ToBooleanBiFunction, BooleanPredicate, BooleanBiPredicate, BooleanConsumer,
        BooleanSupplier, ThrowingBooleanUnaryOperator, ThrowingBooleanBinaryOperator,
        ThrowingBooleanFunction, ThrowingToBooleanFunction, ThrowingBooleanPredicate,
        ThrowingBooleanSupplier,
    }
    i8 => {
        ByteUnaryOperator, ByteBinaryOperator, ByteFunction, ToByteFunction,
        ToByteBiFunction, BytePredicate, ByteBiPredicate, ByteConsumer,
        ByteSupplier, ThrowingByteUnaryOperator, ThrowingByteBinaryOperator,
        ThrowingByteFunction, ThrowingToByteFunction, ThrowingBytePredicate,
        ThrowingByteSupplier,
    }
    char => {
        CharUnaryOperator, CharBinaryOperator, CharFunction, ToCharFunction,
        ToCharBiFunction, CharPredicate, CharBiPredicate, CharConsumer,
        CharSupplier, ThrowingCharUnaryOperator, ThrowingCharBinaryOperator,
        ThrowingCharFunction, ThrowingToCharFunction, ThrowingCharPredicate,
        ThrowingCharSupplier,
    }
    f64 => {
        DoubleUnaryOperator, DoubleBinaryOperator, DoubleFunction, ToDoubleFunction,
        ToDoubleBiFunction, DoublePredicate, DoubleBiPredicate, DoubleConsumer,
        DoubleSupplier, ThrowingDoubleUnaryOperator, ThrowingDoubleBinaryOperator,
        ThrowingDoubleFunction, ThrowingToDoubleFunction, ThrowingDoublePredicate,
        ThrowingDoubleSupplier,
    }
    f32 => {
        FloatUnaryOperator, FloatBinaryOperator, FloatFunction, ToFloatFunction,
        ToFloatBiFunction, FloatPredicate, FloatBiPredicate, FloatConsumer,
        FloatSupplier, ThrowingFloatUnaryOperator, ThrowingFloatBinaryOperator,
        ThrowingFloatFunction, ThrowingToFloatFunction, ThrowingFloatPredicate,
        ThrowingFloatSupplier,
    }
    i32 => {
        IntUnaryOperator, IntBinaryOperator, IntFunction, ToIntFunction,
        ToIntBiFunction, IntPredicate, IntBiPredicate, IntConsumer,
        IntSupplier, ThrowingIntUnaryOperator, ThrowingIntBinaryOperator,
        ThrowingIntFunction, ThrowingToIntFunction, ThrowingIntPredicate,
        ThrowingIntSupplier,
    }
    i64 => {
        LongUnaryOperator, LongBinaryOperator, LongFunction, ToLongFunction,
        ToLongBiFunction, LongPredicate, LongBiPredicate, LongConsumer,
        LongSupplier, ThrowingLongUnaryOperator, ThrowingLongBinaryOperator,
        ThrowingLongFunction, ThrowingToLongFunction, ThrowingLongPredicate,
        ThrowingLongSupplier,
    }
    i16 => {
        ShortUnaryOperator, ShortBinaryOperator, ShortFunction, ToShortFunction,
        ToShortBiFunction, ShortPredicate, ShortBiPredicate, ShortConsumer,
        ShortSupplier, ThrowingShortUnaryOperator, ThrowingShortBinaryOperator,
        ThrowingShortFunction, ThrowingToShortFunction, ThrowingShortPredicate,
        ThrowingShortSupplier,
    }
}
