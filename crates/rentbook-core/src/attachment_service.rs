//! Attachment metadata and the ordered image gallery of each property.

use uuid::Uuid;

use rentbook_domain::{Attachment, Image, Portfolio};

use crate::CoreError;

pub struct AttachmentService;

impl AttachmentService {
    pub fn add_attachment(
        portfolio: &mut Portfolio,
        attachment: Attachment,
    ) -> Result<Uuid, CoreError> {
        if portfolio.property(attachment.property_id).is_none() {
            return Err(CoreError::PropertyNotFound(attachment.property_id));
        }
        if attachment.file_name.trim().is_empty() {
            return Err(CoreError::Validation("file name cannot be empty".into()));
        }
        let id = attachment.id;
        portfolio.attachments.push(attachment);
        portfolio.touch();
        Ok(id)
    }

    pub fn remove_attachment(portfolio: &mut Portfolio, id: Uuid) -> Result<Attachment, CoreError> {
        let index = portfolio
            .attachments
            .iter()
            .position(|attachment| attachment.id == id)
            .ok_or(CoreError::AttachmentNotFound(id))?;
        let removed = portfolio.attachments.remove(index);
        portfolio.touch();
        Ok(removed)
    }

    /// Appends the image at the end of the property's gallery.
    pub fn add_image(portfolio: &mut Portfolio, mut image: Image) -> Result<Uuid, CoreError> {
        if portfolio.property(image.property_id).is_none() {
            return Err(CoreError::PropertyNotFound(image.property_id));
        }
        image.position = Self::gallery(portfolio, image.property_id).len() as u32;
        let id = image.id;
        portfolio.images.push(image);
        portfolio.touch();
        Ok(id)
    }

    /// Removes an image, closes the gap in positions and clears it as cover.
    pub fn remove_image(portfolio: &mut Portfolio, id: Uuid) -> Result<Image, CoreError> {
        let index = portfolio
            .images
            .iter()
            .position(|image| image.id == id)
            .ok_or(CoreError::ImageNotFound(id))?;
        let removed = portfolio.images.remove(index);
        for image in portfolio
            .images
            .iter_mut()
            .filter(|image| image.property_id == removed.property_id && image.position > removed.position)
        {
            image.position -= 1;
        }
        if let Some(property) = portfolio.property_mut(removed.property_id) {
            if property.cover_image_id == Some(id) {
                property.cover_image_id = None;
            }
        }
        portfolio.touch();
        Ok(removed)
    }

    /// Reassigns positions so the gallery follows `order`, which must list every image once.
    pub fn reorder_images(
        portfolio: &mut Portfolio,
        property_id: Uuid,
        order: &[Uuid],
    ) -> Result<(), CoreError> {
        if portfolio.property(property_id).is_none() {
            return Err(CoreError::PropertyNotFound(property_id));
        }
        let mut current: Vec<Uuid> = Self::gallery(portfolio, property_id)
            .iter()
            .map(|image| image.id)
            .collect();
        let mut requested = order.to_vec();
        current.sort();
        requested.sort();
        if current != requested {
            return Err(CoreError::Validation(
                "new order must list every image of the property exactly once".into(),
            ));
        }
        for image in portfolio
            .images
            .iter_mut()
            .filter(|image| image.property_id == property_id)
        {
            if let Some(position) = order.iter().position(|id| *id == image.id) {
                image.position = position as u32;
            }
        }
        portfolio.touch();
        Ok(())
    }

    pub fn set_cover(
        portfolio: &mut Portfolio,
        property_id: Uuid,
        image_id: Uuid,
    ) -> Result<(), CoreError> {
        let belongs = portfolio
            .images
            .iter()
            .any(|image| image.id == image_id && image.property_id == property_id);
        if !belongs {
            return Err(CoreError::ImageNotFound(image_id));
        }
        let property = portfolio
            .property_mut(property_id)
            .ok_or(CoreError::PropertyNotFound(property_id))?;
        property.cover_image_id = Some(image_id);
        portfolio.touch();
        Ok(())
    }

    /// Images of a property ordered by position.
    pub fn gallery(portfolio: &Portfolio, property_id: Uuid) -> Vec<&Image> {
        let mut images: Vec<&Image> = portfolio
            .images
            .iter()
            .filter(|image| image.property_id == property_id)
            .collect();
        images.sort_by_key(|image| image.position);
        images
    }
}
