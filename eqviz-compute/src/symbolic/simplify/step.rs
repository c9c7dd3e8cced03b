/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `2+3 = 5`
    AddNumbers,

    /// `a+(b+c) = a+b+c`
    FlattenAdd,

    /// `a+a = 2a`
    /// `2a+3a = 5a`
    /// etc.
    CombineLikeTerms,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `1*a = a`
    /// `a*1 = a`
    MultiplyOne,

    /// `2*3 = 6`
    MultiplyNumbers,

    /// `a*(b*c) = a*b*c`
    FlattenMultiply,

    /// `a*a = a^2`
    /// `a^2*a^3 = a^5`
    /// etc.
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `0^a = 0`
    PowerZeroLeft,

    /// `1^a = 1`
    PowerOneLeft,

    /// `a^1 = a`
    PowerOne,

    /// `(a^b)^c = a^(b*c)`
    PowerPower,

    /// `2^3 = 8`
    PowerNumbers,
}
