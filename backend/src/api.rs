use std::fmt::Debug;

use auxqhe_sampling::Source;

/// Ties a ciphertext type to a scheme role.
pub trait Scheme {
    type Ciphertext: Clone + Debug + Send + Sync;
}

pub trait SchemeEncrypt: Scheme {
    /// Encrypts `bit`, drawing masks and noise from `source`.
    fn encrypt(&self, bit: bool, source: &mut Source) -> Self::Ciphertext;
}

pub trait SchemeDecrypt: Scheme {
    fn decrypt(&self, ct: &Self::Ciphertext) -> bool;
}

/// Public homomorphic operations over GF(2).
pub trait SchemeEvaluate: Scheme {
    /// Noiseless encryption of a public constant.
    fn trivial(&self, bit: bool) -> Self::Ciphertext;

    /// Ciphertext of `a XOR b`.
    fn add(&self, a: &Self::Ciphertext, b: &Self::Ciphertext) -> Self::Ciphertext;

    /// Ciphertext of `a AND b`.
    fn multiply(&self, a: &Self::Ciphertext, b: &Self::Ciphertext) -> Self::Ciphertext;

    fn add_inplace(&self, res: &mut Self::Ciphertext, a: &Self::Ciphertext) {
        *res = self.add(res, a)
    }

    fn multiply_inplace(&self, res: &mut Self::Ciphertext, a: &Self::Ciphertext) {
        *res = self.multiply(res, a)
    }

    /// XOR of every ciphertext yielded by `cts`; the trivial zero when empty.
    fn sum<'a, I>(&self, cts: I) -> Self::Ciphertext
    where
        I: IntoIterator<Item = &'a Self::Ciphertext>,
        Self::Ciphertext: 'a,
    {
        let mut acc: Self::Ciphertext = self.trivial(false);
        cts.into_iter().for_each(|ct| self.add_inplace(&mut acc, ct));
        acc
    }

    /// AND of every ciphertext yielded by `cts`; the trivial one when empty.
    fn product<'a, I>(&self, cts: I) -> Self::Ciphertext
    where
        I: IntoIterator<Item = &'a Self::Ciphertext>,
        Self::Ciphertext: 'a,
    {
        let mut iter = cts.into_iter();
        match iter.next() {
            None => self.trivial(true),
            Some(first) => {
                let mut acc: Self::Ciphertext = first.clone();
                iter.for_each(|ct| self.multiply_inplace(&mut acc, ct));
                acc
            }
        }
    }
}
