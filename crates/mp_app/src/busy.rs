/// Guard that keeps a busy flag raised while held
pub(crate) struct BusyGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> BusyGuard<'a> {
    pub(crate) fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_is_cleared_on_drop() {
        let mut flag = false;
        {
            let guard = BusyGuard::raise(&mut flag);
            assert!(*guard.flag);
        }
        assert!(!flag);
    }
}
