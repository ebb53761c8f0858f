use super::Result;

pub trait Verify {
    /// Verifying that this struct is sane
    ///
    /// NB: This is called on the whole descriptor before anything is composed.
    fn verify(&self) -> Result<()>;
}
