use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use cgmath::{Matrix3, SquareMatrix, Vector3, Zero};

/// Position and orientation of an object in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3<f64>,
    /// Orthonormal basis; columns are the object's local axes in world space.
    pub attitude: Matrix3<f64>,
}

impl Pose {
    pub fn new(position: Vector3<f64>, attitude: Matrix3<f64>) -> Self {
        Self { position, attitude }
    }

    pub fn at(position: Vector3<f64>) -> Self {
        Self::new(position, Matrix3::identity())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vector3::zero())
    }
}

struct PoseCell {
    pose: RefCell<Pose>,
    bound_to: Cell<Option<usize>>,
}

/// A pose owned by an application object and shared with whatever
/// manipulates it.
///
/// Cloning the handle shares the same pose. A manipulator holds a
/// [`WeakPose`] so it never extends the pose's lifetime, and at most one
/// manipulator may be bound at a time.
#[derive(Clone)]
pub struct SharedPose(Rc<PoseCell>);

impl SharedPose {
    pub fn new(pose: Pose) -> Self {
        Self(Rc::new(PoseCell {
            pose: RefCell::new(pose),
            bound_to: Cell::new(None),
        }))
    }

    pub fn get(&self) -> Pose {
        *self.0.pose.borrow()
    }

    pub fn position(&self) -> Vector3<f64> {
        self.0.pose.borrow().position
    }

    pub fn attitude(&self) -> Matrix3<f64> {
        self.0.pose.borrow().attitude
    }

    pub fn set(&self, pose: Pose) {
        *self.0.pose.borrow_mut() = pose;
    }

    pub fn set_position(&self, position: Vector3<f64>) {
        self.0.pose.borrow_mut().position = position;
    }

    pub fn set_attitude(&self, attitude: Matrix3<f64>) {
        self.0.pose.borrow_mut().attitude = attitude;
    }

    pub fn downgrade(&self) -> WeakPose {
        WeakPose(Rc::downgrade(&self.0))
    }

    /// Whether a manipulator currently holds this pose.
    pub fn is_bound(&self) -> bool {
        self.0.bound_to.get().is_some()
    }

    pub fn ptr_eq(&self, other: &SharedPose) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Marks the pose as held by `owner`. Fails if another owner holds it.
    pub(crate) fn claim(&self, owner: usize) -> bool {
        match self.0.bound_to.get() {
            Some(current) if current != owner => false,
            _ => {
                self.0.bound_to.set(Some(owner));
                true
            }
        }
    }

    pub(crate) fn release(&self, owner: usize) {
        if self.0.bound_to.get() == Some(owner) {
            self.0.bound_to.set(None);
        }
    }
}

impl Default for SharedPose {
    fn default() -> Self {
        Self::new(Pose::default())
    }
}

impl fmt::Debug for SharedPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedPose")
            .field("pose", &self.get())
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// Non-owning reference to a [`SharedPose`].
#[derive(Clone)]
pub struct WeakPose(Weak<PoseCell>);

impl WeakPose {
    pub fn upgrade(&self) -> Option<SharedPose> {
        self.0.upgrade().map(SharedPose)
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl fmt::Debug for WeakPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakPose(alive: {})", self.is_alive())
    }
}
