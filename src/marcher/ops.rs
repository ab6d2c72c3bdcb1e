use crate::marcher::{Node, Renderable, Sample};
use crate::math::V3;
use crate::SdfError;
use std::sync::Arc;

/// Nearest surface of the two wins.
pub struct Union {
    pub a: Node,
    pub b: Node,
}

/// Only the region inside both children.
pub struct Intersection {
    pub a: Node,
    pub b: Node,
}

/// `a` with `b` carved out of it.
pub struct Subtraction {
    pub a: Node,
    pub b: Node,
}

impl Union {
    pub fn new(a: Node, b: Node) -> Self {
        Union { a, b }
    }
}

impl Intersection {
    pub fn new(a: Node, b: Node) -> Self {
        Intersection { a, b }
    }
}

impl Subtraction {
    pub fn new(a: Node, b: Node) -> Self {
        Subtraction { a, b }
    }
}

fn midpoint(a: &Node, b: &Node) -> V3 {
    0.5 * (a.center() + b.center())
}

impl Renderable for Union {
    fn sdf(&self, x: &V3) -> Sample<'_> {
        let a = self.a.sdf(x);
        let b = self.b.sdf(x);
        if a.0 < b.0 {
            a
        } else {
            b
        }
    }

    fn center(&self) -> V3 {
        midpoint(&self.a, &self.b)
    }
}

impl Renderable for Intersection {
    fn sdf(&self, x: &V3) -> Sample<'_> {
        let a = self.a.sdf(x);
        let b = self.b.sdf(x);
        if a.0 > b.0 {
            a
        } else {
            b
        }
    }

    fn center(&self) -> V3 {
        midpoint(&self.a, &self.b)
    }
}

impl Renderable for Subtraction {
    fn sdf(&self, x: &V3) -> Sample<'_> {
        let a = self.a.sdf(x);
        let (d, shader) = self.b.sdf(x);
        if a.0 > -d {
            a
        } else {
            (-d, shader)
        }
    }

    fn center(&self) -> V3 {
        midpoint(&self.a, &self.b)
    }
}

/// Folds `objects` into a chain of binary unions.
pub fn union_all(objects: impl IntoIterator<Item = Node>) -> Result<Node, SdfError> {
    objects
        .into_iter()
        .reduce(|a, b| Arc::new(Union::new(a, b)))
        .ok_or(SdfError::EmptyComposition)
}

pub fn intersection_all(objects: impl IntoIterator<Item = Node>) -> Result<Node, SdfError> {
    objects
        .into_iter()
        .reduce(|a, b| Arc::new(Intersection::new(a, b)))
        .ok_or(SdfError::EmptyComposition)
}
