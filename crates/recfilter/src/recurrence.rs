/// Traversal direction of a filtering pass along the active dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassDirection {
    /// Scan samples in increasing index order.
    Forward,
    /// Scan samples in decreasing index order.
    Backward,
}

/// A causal recursive (IIR) filter evaluated one sample at a time.
///
/// The trait abstracts over the filter order so that the sequential scans and
/// the blocked pipeline share a single implementation. Implementors provide
/// the minimal carry state needed to continue the recurrence across a
/// boundary, plus the linear sensitivity operator that relates a run's
/// outgoing carry to its incoming carry:
///
/// `carry_out = zero_state_response + sensitivity * carry_in`
///
/// where `zero_state_response` is the carry produced by running the
/// recurrence from a zero state, and `sensitivity` is the product of the
/// per-sample state-transition maps over the run. Both are small fixed-size
/// value objects (a scalar for order 1, a 2x2 map for order 2), so the hot
/// path stays allocation-free.
pub trait RecursiveFilter: Copy + Send + Sync {
    /// Minimal state needed to continue the recurrence across a boundary.
    type Carry: Copy + Send + Sync;

    /// Linear map relating a run's outgoing carry to its incoming carry.
    type Sensitivity: Copy + Send + Sync;

    /// The carry corresponding to a zero border condition.
    fn zero_carry(&self) -> Self::Carry;

    /// The sensitivity of an empty run (the identity map).
    fn identity(&self) -> Self::Sensitivity;

    /// Advance the recurrence by one sample and return the output.
    fn step(&self, x: f32, carry: &mut Self::Carry) -> f32;

    /// Extend the sensitivity operator by one sample.
    fn extend(&self, sens: &mut Self::Sensitivity);

    /// Apply the affine carry map of a run to an incoming carry.
    fn propagate(
        &self,
        zero_state: Self::Carry,
        sens: Self::Sensitivity,
        incoming: Self::Carry,
    ) -> Self::Carry;
}

/// A first-order recursive filter `y_i = b0 * x_i - a1 * y_{i-1}`.
///
/// # Examples
///
/// ```
/// use recfilter::recurrence::{FirstOrder, RecursiveFilter};
///
/// let filter = FirstOrder { b0: 1.26795, a1: -0.26795 };
/// let mut carry = filter.zero_carry();
/// let y0 = filter.step(1.0, &mut carry);
/// let y1 = filter.step(0.0, &mut carry);
///
/// assert_eq!(y0, 1.26795);
/// assert!((y1 - 1.26795 * 0.26795).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrder {
    /// Feedforward gain.
    pub b0: f32,
    /// Feedback gain on `y_{i-1}`.
    pub a1: f32,
}

impl RecursiveFilter for FirstOrder {
    /// The last output value.
    type Carry = f32;

    /// The scalar `(-a1)^n` for a run of `n` samples.
    type Sensitivity = f32;

    fn zero_carry(&self) -> f32 {
        0.0
    }

    fn identity(&self) -> f32 {
        1.0
    }

    fn step(&self, x: f32, carry: &mut f32) -> f32 {
        let y = self.b0 * x - self.a1 * *carry;
        *carry = y;
        y
    }

    fn extend(&self, sens: &mut f32) {
        *sens *= -self.a1;
    }

    fn propagate(&self, zero_state: f32, sens: f32, incoming: f32) -> f32 {
        zero_state + sens * incoming
    }
}

/// A second-order recursive filter `y_i = b0 * x_i - a1 * y_{i-1} - a2 * y_{i-2}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrder {
    /// Feedforward gain.
    pub b0: f32,
    /// Feedback gain on `y_{i-1}`.
    pub a1: f32,
    /// Feedback gain on `y_{i-2}`.
    pub a2: f32,
}

impl RecursiveFilter for SecondOrder {
    /// The last two output values, newest first.
    type Carry = [f32; 2];

    /// Row-major 2x2 product of the per-sample state-transition maps.
    type Sensitivity = [[f32; 2]; 2];

    fn zero_carry(&self) -> [f32; 2] {
        [0.0, 0.0]
    }

    fn identity(&self) -> [[f32; 2]; 2] {
        [[1.0, 0.0], [0.0, 1.0]]
    }

    fn step(&self, x: f32, carry: &mut [f32; 2]) -> f32 {
        let y = self.b0 * x - self.a1 * carry[0] - self.a2 * carry[1];
        *carry = [y, carry[0]];
        y
    }

    fn extend(&self, sens: &mut [[f32; 2]; 2]) {
        // Left-multiply by the one-sample transition [[-a1, -a2], [1, 0]].
        let top = [
            -self.a1 * sens[0][0] - self.a2 * sens[1][0],
            -self.a1 * sens[0][1] - self.a2 * sens[1][1],
        ];
        sens[1] = sens[0];
        sens[0] = top;
    }

    fn propagate(
        &self,
        zero_state: [f32; 2],
        sens: [[f32; 2]; 2],
        incoming: [f32; 2],
    ) -> [f32; 2] {
        [
            zero_state[0] + sens[0][0] * incoming[0] + sens[0][1] * incoming[1],
            zero_state[1] + sens[1][0] * incoming[0] + sens[1][1] * incoming[1],
        ]
    }
}
