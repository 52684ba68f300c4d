//! Operator overloads.

use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Deref;
use std::ops::DerefMut;
use std::ops::Neg;
use std::ops::Sub;
use std::ops::SubAssign;

use num::Zero;

use crate::geo::Point;

impl<T> Deref for Point<T> {
  type Target = [T; 2];
  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl<T> DerefMut for Point<T> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl<T> From<(T, T)> for Point<T> {
  #[inline]
  fn from((x, y): (T, T)) -> Self {
    Self::new(x, y)
  }
}

impl<T> From<[T; 2]> for Point<T> {
  #[inline]
  fn from(xs: [T; 2]) -> Self {
    Self(xs)
  }
}

impl<T: Zero + Add<Output = T> + Copy> Zero for Point<T> {
  #[inline]
  fn zero() -> Self {
    Point::zero()
  }

  #[inline]
  fn is_zero(&self) -> bool {
    self.iter().all(|x| x.is_zero())
  }
}

impl<T: Neg<Output = T> + Copy> Neg for Point<T> {
  type Output = Point<T>;
  #[inline]
  fn neg(self) -> Self::Output {
    Point([-self.0[0], -self.0[1]])
  }
}

impl<T: Add<Output = T> + Copy> Add for Point<T> {
  type Output = Point<T>;
  #[inline]
  fn add(self, other: Point<T>) -> Self::Output {
    Point([self.0[0] + other.0[0], self.0[1] + other.0[1]])
  }
}

impl<T: Sub<Output = T> + Copy> Sub for Point<T> {
  type Output = Point<T>;
  #[inline]
  fn sub(self, other: Point<T>) -> Self::Output {
    Point([self.0[0] - other.0[0], self.0[1] - other.0[1]])
  }
}

impl<T: AddAssign + Copy> AddAssign for Point<T> {
  #[inline]
  fn add_assign(&mut self, other: Point<T>) {
    for (i, x) in self.iter_mut().enumerate() {
      *x += other.0[i];
    }
  }
}

impl<T: SubAssign + Copy> SubAssign for Point<T> {
  #[inline]
  fn sub_assign(&mut self, other: Point<T>) {
    for (i, x) in self.iter_mut().enumerate() {
      *x -= other.0[i];
    }
  }
}
