/// A point in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2<T> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> Point2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn coordinates(&self) -> [T; 2] {
        [self.x, self.y]
    }
}

impl<T> From<(T, T)> for Point2<T> {
    fn from(value: (T, T)) -> Self {
        Point2 {
            x: value.0,
            y: value.1,
        }
    }
}

impl<T> From<[T; 2]> for Point2<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Point2 { x, y }
    }
}

/// A point in space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Copy> Point3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    pub fn coordinates(&self) -> [T; 3] {
        [self.x, self.y, self.z]
    }
}

impl<T> From<(T, T, T)> for Point3<T> {
    fn from(value: (T, T, T)) -> Self {
        Point3 {
            x: value.0,
            y: value.1,
            z: value.2,
        }
    }
}

impl<T> From<[T; 3]> for Point3<T> {
    fn from([x, y, z]: [T; 3]) -> Self {
        Point3 { x, y, z }
    }
}
