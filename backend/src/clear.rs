use auxqhe_sampling::Source;

use crate::{Scheme, SchemeDecrypt, SchemeEncrypt, SchemeEvaluate};

/// Reference backend: the ciphertext is the bit itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClearScheme;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClearCiphertext(pub bool);

impl Scheme for ClearScheme {
    type Ciphertext = ClearCiphertext;
}

impl SchemeEncrypt for ClearScheme {
    fn encrypt(&self, bit: bool, _source: &mut Source) -> ClearCiphertext {
        ClearCiphertext(bit)
    }
}

impl SchemeDecrypt for ClearScheme {
    fn decrypt(&self, ct: &ClearCiphertext) -> bool {
        ct.0
    }
}

impl SchemeEvaluate for ClearScheme {
    fn trivial(&self, bit: bool) -> ClearCiphertext {
        ClearCiphertext(bit)
    }

    fn add(&self, a: &ClearCiphertext, b: &ClearCiphertext) -> ClearCiphertext {
        ClearCiphertext(a.0 ^ b.0)
    }

    fn multiply(&self, a: &ClearCiphertext, b: &ClearCiphertext) -> ClearCiphertext {
        ClearCiphertext(a.0 & b.0)
    }
}
