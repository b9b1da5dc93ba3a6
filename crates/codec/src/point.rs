//! Explicit P-256 curve membership check

use bridge_se_api::{Error, RawPublicKey, Result};
use p256::elliptic_curve::{subtle::ConstantTimeEq, Field, PrimeField};
use p256::{FieldBytes, NistP256};
use primeorder::PrimeCurveParams;

type FieldElement = <NistP256 as PrimeCurveParams>::FieldElement;

const CONTEXT: &str = "validate_on_curve";

/// Check that `(x, y)` satisfies `y^2 = x^3 + a*x + b` over the P-256 base field
///
/// Both coordinates must also be fully reduced, i.e. less than `p`. The point
/// at infinity has no affine coordinates and is never accepted.
pub fn validate_on_curve(raw: &RawPublicKey) -> Result<()> {
    let x = field_element(raw.x(), "x")?;
    let y = field_element(raw.y(), "y")?;

    let lhs = y.square();
    let rhs = x.square() * x
        + <NistP256 as PrimeCurveParams>::EQUATION_A * x
        + <NistP256 as PrimeCurveParams>::EQUATION_B;

    if bool::from(lhs.ct_eq(&rhs)) {
        Ok(())
    } else {
        tracing::debug!(point = %raw.to_hex(), "coordinates are off the curve");
        Err(Error::invalid_point(CONTEXT, "point does not satisfy the curve equation"))
    }
}

fn field_element(bytes: &[u8; 32], name: &str) -> Result<FieldElement> {
    Option::from(FieldElement::from_repr(FieldBytes::from(*bytes))).ok_or_else(|| {
        Error::invalid_point(CONTEXT, format!("{name} coordinate is not below the field modulus"))
    })
}
