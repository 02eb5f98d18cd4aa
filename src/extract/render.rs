use super::types::ShopDetail;

/// Fixed markdown template; every slot is filled even when empty.
pub fn render_detail_markdown(d: &ShopDetail) -> String {
    format!(
        "# {name}\n\
         \n\
         **评分**: {rating} ({reviews})  \n\
         **人均**: {price}  \n\
         **地区**: {region}  \n\
         **分类**: {category}  \n\
         **评分详情**: {score}\n\
         \n\
         **地址**: {address}  \n\
         {address_detail}\n\
         \n\
         **营业信息**: {hours}  \n\
         **特色**: {tags}\n\
         \n\
         **推荐菜**:\n\
         {dishes}\n",
        name = d.name,
        rating = d.rating,
        reviews = d.review_count,
        price = d.price,
        region = d.region,
        category = d.category,
        score = d.score_text,
        address = d.address,
        address_detail = d.address_detail,
        hours = d.business_hours,
        tags = d.tags.join(" "),
        dishes = d.recommend_dishes.join(", "),
    )
}
