use super::val::{StrDesc, Val};
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Most subscripts an array can carry.
pub(super) const MAX_DIMS: usize = 11;

/// ## Variable names
///
/// Only the first two characters of a name are significant: `SCORE` and
/// `SCOREBOARD` are the same variable. The `$` and `%` suffixes are part of
/// the identity, so `A`, `A$`, and `A%` are three distinct variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarName {
    chars: [u8; 2],
    string: bool,
    int: bool,
}

impl VarName {
    /// Builds a name from the scanned identifier characters (already known
    /// to start with a letter) and its suffix flags. One-character names pad
    /// with a space.
    pub fn new(ident: &[u8], string: bool, int: bool) -> VarName {
        let first = ident[0].to_ascii_uppercase();
        let second = ident.get(1).map_or(b' ', |b| b.to_ascii_uppercase());
        VarName {
            chars: [first, second],
            string,
            int,
        }
    }

    pub fn is_string(&self) -> bool {
        self.string
    }

    /// Default value for an unreferenced variable of this type.
    pub fn default_val(&self) -> Val {
        if self.string {
            Val::Str(StrDesc::empty())
        } else {
            Val::Number(0.0)
        }
    }
}

impl std::fmt::Display for VarName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.chars[0] as char)?;
        if self.chars[1] != b' ' {
            write!(f, "{}", self.chars[1] as char)?;
        }
        if self.string {
            write!(f, "$")?;
        } else if self.int {
            write!(f, "%")?;
        }
        Ok(())
    }
}

/// ## Simple variables
#[derive(Debug, Default)]
pub struct Vars {
    map: HashMap<VarName, Val>,
}

impl Vars {
    pub fn fetch(&self, name: VarName) -> Val {
        match self.map.get(&name) {
            Some(val) => val.clone(),
            None => name.default_val(),
        }
    }

    pub fn store(&mut self, name: VarName, val: Val) {
        self.map.insert(name, val);
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// ## Arrays
///
/// Row-major storage; dimensions are frozen at DIM time (or at the implicit
/// single-dimension auto-DIM) until the next CLEAR/NEW/RUN.
#[derive(Debug)]
pub struct Array {
    dims: Vec<usize>,
    data: Vec<Val>,
}

impl Array {
    fn new(name: VarName, dims: Vec<usize>) -> Array {
        let total = dims.iter().product();
        Array {
            dims,
            data: vec![name.default_val(); total],
        }
    }

    pub fn dim_count(&self) -> usize {
        self.dims.len()
    }

    /// Resolves subscripts to a linear index, checking count and bounds.
    pub fn index(&self, subscripts: &[i64]) -> Result<usize> {
        if subscripts.len() != self.dims.len() {
            return Err(error!(BadSubscript));
        }
        let mut idx = 0;
        for (&sub, &size) in subscripts.iter().zip(&self.dims) {
            if sub < 0 || sub as usize >= size {
                return Err(error!(BadSubscript));
            }
            idx = idx * size + sub as usize;
        }
        Ok(idx)
    }

    pub fn get(&self, idx: usize) -> Val {
        self.data[idx].clone()
    }

    pub fn set(&mut self, idx: usize, val: Val) {
        self.data[idx] = val;
    }
}

#[derive(Debug, Default)]
pub struct Arrays {
    map: HashMap<VarName, Array>,
}

impl Arrays {
    /// DIM. Each entry in `dims` is a dimension size (max subscript + 1).
    /// Redimensioning an existing array is an error.
    pub fn dim(&mut self, name: VarName, dims: Vec<usize>) -> Result<()> {
        if self.map.contains_key(&name) {
            return Err(error!(RedimensionedArray));
        }
        self.map.insert(name, Array::new(name, dims));
        Ok(())
    }

    /// A bare reference to an undeclared array creates one dimension of
    /// size 11 (subscripts 0..10).
    pub fn auto_dim(&mut self, name: VarName) {
        self.map
            .entry(name)
            .or_insert_with(|| Array::new(name, vec![11]));
    }

    pub fn get(&self, name: VarName) -> Option<&Array> {
        self.map.get(&name)
    }

    pub fn get_mut(&mut self, name: VarName) -> Option<&mut Array> {
        self.map.get_mut(&name)
    }

    /// Subscripts to a linear index for an array that must already exist.
    pub fn index_of(&self, name: VarName, subscripts: &[i64]) -> Result<usize> {
        match self.map.get(&name) {
            Some(arr) => arr.index(subscripts),
            None => Err(error!(BadSubscript)),
        }
    }

    pub fn element(&self, name: VarName, subscripts: &[i64]) -> Result<Val> {
        let arr = match self.map.get(&name) {
            Some(arr) => arr,
            None => return Err(error!(BadSubscript)),
        };
        let idx = arr.index(subscripts)?;
        Ok(arr.get(idx))
    }

    pub fn set_element(&mut self, name: VarName, idx: usize, val: Val) -> Result<()> {
        match self.map.get_mut(&name) {
            Some(arr) => {
                arr.set(idx, val);
                Ok(())
            }
            None => Err(error!(BadSubscript)),
        }
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// ## User functions
///
/// DEF FN captures the tokenised remainder of its statement; a call points a
/// scratch cursor at the stored body and runs the expression evaluator over
/// it.
#[derive(Debug, Clone)]
pub struct UserFn {
    pub param: u8,
    pub body: Rc<[u8]>,
}

#[derive(Debug, Default)]
pub struct UserFns {
    map: HashMap<u8, UserFn>,
}

impl UserFns {
    pub fn define(&mut self, name: u8, param: u8, body: Rc<[u8]>) {
        self.map.insert(name, UserFn { param, body });
    }

    pub fn get(&self, name: u8) -> Option<&UserFn> {
        self.map.get(&name)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn name(s: &str) -> VarName {
        let string = s.ends_with('$');
        let int = s.ends_with('%');
        let ident = s.trim_end_matches(|c| c == '$' || c == '%');
        VarName::new(ident.as_bytes(), string, int)
    }

    #[test]
    fn test_two_significant_chars() {
        assert_eq!(name("SCORE"), name("SCOREBOARD"));
        assert_eq!(name("a"), name("A"));
        assert_ne!(name("A"), name("AB"));
    }

    #[test]
    fn test_suffix_distinguishes() {
        assert_ne!(name("A"), name("A$"));
        assert_ne!(name("A"), name("A%"));
        assert_ne!(name("A$"), name("A%"));
    }

    #[test]
    fn test_fetch_default() {
        let vars = Vars::default();
        match vars.fetch(name("X")) {
            Val::Number(n) => assert_eq!(n, 0.0),
            _ => panic!("numeric default expected"),
        }
        match vars.fetch(name("X$")) {
            Val::Str(s) => assert_eq!(s.len(), 0),
            _ => panic!("string default expected"),
        }
    }

    #[test]
    fn test_array_round_trip() {
        let mut arrays = Arrays::default();
        arrays.dim(name("A"), vec![3, 4]).unwrap();
        let arr = arrays.get_mut(name("A")).unwrap();
        let idx = arr.index(&[2, 3]).unwrap();
        arr.set(idx, Val::Number(7.0));
        match arr.get(idx) {
            Val::Number(n) => assert_eq!(n, 7.0),
            _ => panic!(),
        }
    }

    #[test]
    fn test_subscript_bounds() {
        let mut arrays = Arrays::default();
        arrays.dim(name("A"), vec![11]).unwrap();
        let arr = arrays.get(name("A")).unwrap();
        assert!(arr.index(&[10]).is_ok());
        assert_eq!(arr.index(&[11]).unwrap_err().code(), ErrorCode::BadSubscript);
        assert_eq!(arr.index(&[-1]).unwrap_err().code(), ErrorCode::BadSubscript);
        assert_eq!(
            arr.index(&[1, 1]).unwrap_err().code(),
            ErrorCode::BadSubscript
        );
    }

    #[test]
    fn test_redim_is_error() {
        let mut arrays = Arrays::default();
        arrays.dim(name("A"), vec![5]).unwrap();
        assert_eq!(
            arrays.dim(name("A"), vec![5]).unwrap_err().code(),
            ErrorCode::RedimensionedArray
        );
    }

    #[test]
    fn test_auto_dim_shape() {
        let mut arrays = Arrays::default();
        arrays.auto_dim(name("Q"));
        let arr = arrays.get(name("Q")).unwrap();
        assert_eq!(arr.dim_count(), 1);
        assert!(arr.index(&[10]).is_ok());
        assert!(arr.index(&[11]).is_err());
    }
}
