use std::ops::Add;

/// Something that has a total cost, such as an [Edit][crate::Edit] or an edit script.
pub trait Cost {
    type Output;
    fn cost(&self) -> Self::Output;
}

impl<C: Cost> Cost for [C]
where
    C::Output: Default + Add<Output = C::Output>,
{
    type Output = C::Output;

    #[inline]
    fn cost(&self) -> Self::Output {
        self.iter().fold(Default::default(), |w, c| w + c.cost())
    }
}
