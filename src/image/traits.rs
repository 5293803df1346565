pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageF32;

    #[test]
    fn rows_visits_every_row_in_order() {
        let mut img = ImageF32::new(3, 4);
        for y in 0..4 {
            img.set(0, y, y as f32);
        }
        let firsts: Vec<f32> = img.rows().map(|row| row[0]).collect();
        assert_eq!(firsts, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(img.rows().count(), 4);
    }

    #[test]
    fn row_slices_have_image_width() {
        let img = ImageF32::new(5, 2);
        for row in img.rows() {
            assert_eq!(row.len(), 5);
        }
    }
}
